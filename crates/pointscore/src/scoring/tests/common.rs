use axum::response::Response;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::scoring::breakdown::{LEVEL_KEY, POLICY_KEYS};
use crate::scoring::profile::{CrsProfile, FswpProfile};

/// Merge JSON fragments into one profile, later fragments winning.
pub(super) fn profile<P: DeserializeOwned>(parts: &[Value]) -> P {
    let mut merged = Map::new();
    for part in parts {
        if let Value::Object(fields) = part {
            merged.extend(fields.clone());
        }
    }
    serde_json::from_value(Value::Object(merged)).expect("profile fixture deserializes")
}

pub(super) fn crs(parts: &[Value]) -> CrsProfile {
    profile(parts)
}

pub(super) fn fswp(parts: &[Value]) -> FswpProfile {
    profile(parts)
}

/// Language fields for `prefix` (`first_language`, `second_language`, `spouse_language`).
pub(super) fn scores(prefix: &str, test: &str, values: [&str; 4]) -> Value {
    let mut fields = Map::new();
    fields.insert(format!("{prefix}_test"), Value::from(test));
    for (skill, value) in ["speaking", "listening", "reading", "writing"]
        .iter()
        .zip(values)
    {
        fields.insert(format!("{prefix}_{skill}"), Value::from(value));
    }
    Value::Object(fields)
}

/// CELPIP levels map one-to-one onto CLB levels.
pub(super) fn celpip(prefix: &str, level: u8) -> Value {
    let level = level.to_string();
    scores(prefix, "celpip", [&level, &level, &level, &level])
}

/// TEF scores landing on the given NCLC level in all four skills.
pub(super) fn tef(prefix: &str, nclc: u8) -> Value {
    let values = match nclc {
        10 => ["400", "320", "270", "400"],
        7 => ["320", "260", "220", "320"],
        5 => ["250", "200", "160", "250"],
        4 => ["200", "160", "130", "200"],
        other => panic!("no TEF fixture for NCLC {other}"),
    };
    scores(prefix, "tef", values)
}

pub(super) fn single() -> Value {
    json!({ "marital_status": "single" })
}

pub(super) fn accompanying_spouse() -> Value {
    json!({
        "marital_status": "married",
        "spouse_citizen_or_pr": "no",
        "spouse_accompanying": "yes",
    })
}

/// Every CRS factor at its best option for a single applicant.
pub(super) fn maximal_crs() -> CrsProfile {
    crs(&[
        single(),
        json!({
            "age": "25",
            "education": "doctoral",
            "canadian_credential": "three-year-or-longer",
            "canadian_work_experience": "5+",
            "foreign_work_experience": "3+",
            "certificate_of_qualification": "yes",
            "job_offer": "teer-0-major-group-00",
            "provincial_nomination": "yes",
            "sibling_in_canada": "yes",
        }),
        celpip("first_language", 12),
        tef("second_language", 10),
    ])
}

/// A realistic applicant with no additional-factor points.
pub(super) fn typical_crs() -> CrsProfile {
    crs(&[
        single(),
        json!({
            "age": "31",
            "education": "bachelors",
            "canadian_work_experience": "1",
            "foreign_work_experience": "2",
        }),
        celpip("first_language", 9),
    ])
}

pub(super) fn maximal_fswp() -> FswpProfile {
    fswp(&[
        single(),
        json!({
            "age": "25",
            "education": "doctoral",
            "work_experience": "6+",
            "arranged_employment": "yes",
            "canadian_work": "yes",
            "relative_in_canada": "yes",
        }),
        celpip("first_language", 12),
        tef("second_language", 10),
    ])
}

pub(super) fn typical_fswp() -> FswpProfile {
    fswp(&[
        single(),
        json!({
            "age": "30",
            "education": "masters",
            "work_experience": "6+",
        }),
        celpip("first_language", 9),
    ])
}

/// Numeric leaves of a serialized breakdown, split into points and schedule limits.
#[derive(Debug, Default)]
pub(super) struct Leaves {
    pub(super) points: Vec<(String, u64)>,
    pub(super) limits: Vec<(String, u64)>,
}

pub(super) fn leaves(value: &Value) -> Leaves {
    fn walk(path: &str, key: &str, value: &Value, leaves: &mut Leaves) {
        match value {
            Value::Object(fields) => {
                for (name, child) in fields {
                    if name == LEVEL_KEY {
                        continue;
                    }
                    walk(&format!("{path}.{name}"), name, child, leaves);
                }
            }
            Value::Number(number) => {
                let entry = (path.to_string(), number.as_u64().unwrap_or(u64::MAX));
                if POLICY_KEYS.contains(&key) {
                    leaves.limits.push(entry);
                } else {
                    leaves.points.push(entry);
                }
            }
            _ => {}
        }
    }

    let mut collected = Leaves::default();
    walk("", "", value, &mut collected);
    collected
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
