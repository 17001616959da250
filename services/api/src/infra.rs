use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use pointscore::error::AppError;
use pointscore::scoring::age_on;
use pointscore::{ProfileError, ScoringSystem};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_system(raw: &str) -> Result<ScoringSystem, String> {
    raw.parse::<ScoringSystem>().map_err(|err| err.to_string())
}

/// Parse a JSON profile, deriving `age` from a birth date when one is supplied.
pub(crate) fn load_profile<P: DeserializeOwned>(
    raw: &str,
    date_of_birth: Option<NaiveDate>,
    as_of: NaiveDate,
) -> Result<P, AppError> {
    let mut value: Value = serde_json::from_str(raw)?;

    if let Some(date_of_birth) = date_of_birth {
        let age = age_on(date_of_birth, as_of).ok_or_else(|| ProfileError::InvalidAge {
            field: "date_of_birth",
            value: date_of_birth.to_string(),
        })?;
        if let Value::Object(fields) = &mut value {
            fields.insert("age".to_string(), Value::from(age.to_string()));
        }
    }

    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointscore::CrsProfile;

    fn date(raw: &str) -> NaiveDate {
        parse_date(raw).expect("valid date")
    }

    #[test]
    fn birth_date_overrides_the_stated_age() {
        let profile: CrsProfile = load_profile(
            r#"{"age":"40","education":"masters"}"#,
            Some(date("1990-06-15")),
            date("2025-06-14"),
        )
        .expect("profile loads");

        assert_eq!(profile.age, "34");
        assert_eq!(profile.education, "masters");
    }

    #[test]
    fn future_birth_date_is_a_profile_error() {
        let result = load_profile::<CrsProfile>("{}", Some(date("2030-01-01")), date("2025-01-01"));
        assert!(matches!(result, Err(AppError::Profile(_))));
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = load_profile::<CrsProfile>("{ not json", None, date("2025-01-01"));
        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[test]
    fn misspelled_field_in_profile_file_is_reported() {
        let result = load_profile::<CrsProfile>(
            r#"{"age":"29","provincal_nomination":"yes"}"#,
            None,
            date("2025-01-01"),
        );
        match result {
            Err(AppError::Json(err)) => assert!(err.to_string().contains("provincal_nomination")),
            other => panic!("expected a JSON error, got {other:?}"),
        }
    }

    #[test]
    fn parse_date_reports_bad_input() {
        let err = parse_date("15/06/1990").expect_err("wrong format");
        assert!(err.contains("15/06/1990"));
    }
}
