use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::batch::ProfileImportError;
use super::normalizer::ProfileError;
use super::options::catalog;
use super::service::ScoringService;
use super::{CrsEngine, FswpEngine, PointsSystem, ScoringSystem};

/// Router builder exposing the scoring endpoints.
pub fn score_router(service: Arc<ScoringService>) -> Router {
    Router::new()
        .route("/api/v1/scores/crs", post(score_handler::<CrsEngine>))
        .route("/api/v1/scores/fswp", post(score_handler::<FswpEngine>))
        .route("/api/v1/scores/batch", post(batch_handler))
        .route("/api/v1/options", get(options_handler))
        .with_state(service)
}

/// Body returned for a single scored profile.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse<B> {
    pub system: ScoringSystem,
    pub evaluated_on: NaiveDate,
    pub total: u16,
    pub breakdown: B,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub system: ScoringSystem,
    pub csv: String,
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<ScoringService>>,
    payload: Result<axum::Json<S::Profile>, JsonRejection>,
) -> Response
where
    S: PointsSystem,
    ScoringService: AsRef<S>,
{
    let profile = match payload {
        Ok(axum::Json(profile)) => profile,
        Err(rejection) => return payload_rejected(S::SYSTEM, &rejection),
    };

    match service.score::<S>(&profile) {
        Ok(result) => {
            let body = ScoreResponse {
                system: S::SYSTEM,
                evaluated_on: Local::now().date_naive(),
                total: result.total,
                breakdown: result.breakdown,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(error) => profile_rejected(S::SYSTEM, &error),
    }
}

pub(crate) async fn batch_handler(
    State(service): State<Arc<ScoringService>>,
    axum::Json(request): axum::Json<BatchRequest>,
) -> Response {
    match service.batch(request.system, request.csv.as_bytes()) {
        Ok(batch) => {
            let payload = json!({
                "system": batch.system,
                "rows": batch.entries.len(),
                "scored": batch.scored(),
                "rejected": batch.rejected(),
                "entries": batch.entries,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error @ ProfileImportError::TooManyRows { .. }) => {
            warn!(system = request.system.id(), %error, "profile batch refused");
            let payload = json!({
                "error": error.to_string(),
                "limit": service.max_batch_rows(),
            });
            (StatusCode::PAYLOAD_TOO_LARGE, axum::Json(payload)).into_response()
        }
        Err(error) => {
            warn!(system = request.system.id(), %error, "profile batch unreadable");
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn options_handler() -> Response {
    (StatusCode::OK, axum::Json(catalog())).into_response()
}

/// Unknown or misspelled keys land here, since profiles deny unknown fields.
fn payload_rejected(system: ScoringSystem, rejection: &JsonRejection) -> Response {
    let error = rejection.body_text();
    warn!(system = system.id(), %error, "profile payload rejected");
    let payload = json!({
        "error": error,
    });
    (rejection.status(), axum::Json(payload)).into_response()
}

fn profile_rejected(system: ScoringSystem, error: &ProfileError) -> Response {
    warn!(
        system = system.id(),
        field = error.field(),
        %error,
        "profile rejected"
    );
    let payload = json!({
        "error": error.to_string(),
        "field": error.field(),
    });
    (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
}
