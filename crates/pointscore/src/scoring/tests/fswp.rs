use super::common::*;
use serde_json::json;

use crate::scoring::breakdown::FswpBreakdown;
use crate::scoring::options::{EducationLevel, OptionSet, SkilledExperience};
use crate::scoring::profile::FswpProfile;
use crate::scoring::{FswpEngine, PointsSystem};

fn score(profile: &FswpProfile) -> FswpBreakdown {
    let result = FswpEngine::new().score(profile).expect("profile scores");
    assert_eq!(result.total, result.breakdown.total);
    result.breakdown
}

#[test]
fn zero_profile_scores_nothing() {
    let breakdown = score(&FswpProfile::default());

    assert_eq!(breakdown.total, 0);
    assert_eq!(breakdown.language.total, 0);
    assert_eq!(breakdown.language.second_language.points, 0);
    assert_eq!(breakdown.adaptability.raw, 0);
    assert!(!breakdown.eligibility.meets_pass_mark);
    assert!(!breakdown.eligibility.meets_language_minimum);
}

#[test]
fn zero_profile_serializes_only_zero_points() {
    let breakdown = score(&FswpProfile::default());
    let value = serde_json::to_value(&breakdown).expect("serializes");
    let leaves = leaves(&value);

    for (path, points) in &leaves.points {
        assert_eq!(*points, 0, "{path} is not zero");
    }
    let limits = leaves
        .limits
        .iter()
        .map(|(path, value)| (path.as_str(), *value))
        .collect::<Vec<_>>();
    assert!(limits.contains(&(".eligibility.passMark", 67)));
    assert!(limits.contains(&(".language.secondLanguage.threshold", 5)));
    assert!(limits.contains(&(".adaptability.cap", 10)));
}

#[test]
fn maximal_profile_reaches_one_hundred() {
    let breakdown = score(&maximal_fswp());

    assert_eq!(breakdown.language.first_language.total, 24);
    assert_eq!(breakdown.language.second_language.points, 4);
    assert_eq!(breakdown.language.total, 28);
    assert_eq!(breakdown.education, 25);
    assert_eq!(breakdown.experience, 15);
    assert_eq!(breakdown.age, 12);
    assert_eq!(breakdown.arranged_employment, 10);
    assert_eq!(breakdown.adaptability.total, 10);
    assert_eq!(breakdown.total, 100);
    breakdown.verify().expect("consistent");
}

#[test]
fn typical_profile_passes() {
    let breakdown = score(&typical_fswp());

    assert_eq!(breakdown.total, 74);
    assert_eq!(breakdown.eligibility.pass_mark, 67);
    assert!(breakdown.eligibility.meets_pass_mark);
    assert!(breakdown.eligibility.meets_language_minimum);
}

#[test]
fn low_scores_miss_the_pass_mark() {
    let profile = fswp(&[
        json!({ "age": "45", "education": "secondary", "work_experience": "1" }),
        celpip("first_language", 7),
    ]);
    let breakdown = score(&profile);

    assert_eq!(breakdown.total, 2 + 5 + 9 + 16);
    assert!(!breakdown.eligibility.meets_pass_mark);
    assert!(breakdown.eligibility.meets_language_minimum);
}

#[test]
fn first_language_points_per_skill() {
    let points = |level: u8| {
        score(&fswp(&[celpip("first_language", level)]))
            .language
            .first_language
            .total
    };

    assert_eq!(points(6), 0);
    assert_eq!(points(7), 16);
    assert_eq!(points(8), 20);
    assert_eq!(points(9), 24);
    assert_eq!(points(12), 24);
}

#[test]
fn one_weak_skill_misses_the_language_minimum() {
    let mut profile = typical_fswp();
    profile.first_language_writing = "6".to_string();
    let breakdown = score(&profile);

    assert!(!breakdown.eligibility.meets_language_minimum);
    assert_eq!(breakdown.language.first_language.writing.points, 0);
}

#[test]
fn second_language_is_all_or_nothing() {
    let met = score(&fswp(&[
        celpip("first_language", 9),
        tef("second_language", 5),
    ]));
    assert_eq!(met.language.second_language.points, 4);

    let mut short = fswp(&[celpip("first_language", 9), tef("second_language", 5)]);
    short.second_language_reading = "150".to_string();
    let missed = score(&short);
    assert_eq!(missed.language.second_language.points, 0);
    assert_eq!(
        missed.language.second_language.clb.reading.map(|clb| clb.level()),
        Some(4)
    );
}

#[test]
fn adaptability_reports_raw_and_caps_at_ten() {
    let profile = fswp(&[json!({
        "canadian_work": "yes",
        "canadian_study": "yes",
        "arranged_employment": "yes",
        "relative_in_canada": "yes",
    })]);
    let breakdown = score(&profile);

    assert_eq!(breakdown.adaptability.canadian_work, 10);
    assert_eq!(breakdown.adaptability.canadian_study, 5);
    assert_eq!(breakdown.adaptability.arranged_employment, 5);
    assert_eq!(breakdown.adaptability.relative_in_canada, 5);
    assert_eq!(breakdown.adaptability.raw, 25);
    assert_eq!(breakdown.adaptability.total, 10);
    assert_eq!(breakdown.total, 20);
}

#[test]
fn accompanying_spouse_adds_adaptability() {
    let profile = fswp(&[
        accompanying_spouse(),
        json!({ "spouse_canadian_study": "yes" }),
        celpip("spouse_language", 4),
    ]);
    let breakdown = score(&profile);

    assert_eq!(breakdown.adaptability.spouse_language, 5);
    assert_eq!(breakdown.adaptability.spouse_canadian_study, 5);
    assert_eq!(breakdown.adaptability.total, 10);
}

#[test]
fn single_applicant_spouse_answers_are_ignored() {
    let profile = fswp(&[
        single(),
        json!({ "spouse_canadian_study": "yes", "spouse_canadian_work": "maybe" }),
        celpip("spouse_language", 9),
    ]);
    let breakdown = score(&profile);

    assert_eq!(breakdown.adaptability.raw, 0);
}

#[test]
fn better_education_and_experience_never_lower_the_total() {
    let mut previous = 0;
    for level in EducationLevel::ALL {
        let mut profile = typical_fswp();
        profile.education = level.id().to_string();
        let total = score(&profile).total;
        assert!(total >= previous, "{} lowered the total", level.id());
        previous = total;
    }

    let mut previous = 0;
    for years in SkilledExperience::ALL {
        let mut profile = typical_fswp();
        profile.work_experience = years.id().to_string();
        let total = score(&profile).total;
        assert!(total >= previous, "{} lowered the total", years.id());
        previous = total;
    }
}

#[test]
fn applying_caps_twice_changes_nothing() {
    let mut breakdown = score(&maximal_fswp());
    let once = breakdown.clone();

    breakdown.apply_caps();
    breakdown.apply_caps();
    assert_eq!(breakdown, once);
}

#[test]
fn scoring_is_deterministic() {
    let engine = FswpEngine::new();
    let first = engine.score(&typical_fswp()).expect("scores");
    let second = engine.score(&typical_fswp()).expect("scores");
    assert_eq!(first, second);
}
