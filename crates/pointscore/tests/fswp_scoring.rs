use pointscore::{FswpEngine, FswpProfile, PointsSystem, ProfileError};

fn french_speaking_engineer() -> FswpProfile {
    FswpProfile {
        age: "38".to_string(),
        education: "two-or-more".to_string(),
        first_language_test: "tcf".to_string(),
        first_language_speaking: "14".to_string(),
        first_language_listening: "530".to_string(),
        first_language_reading: "510".to_string(),
        first_language_writing: "12".to_string(),
        second_language_test: "ielts".to_string(),
        second_language_speaking: "5.5".to_string(),
        second_language_listening: "6.0".to_string(),
        second_language_reading: "5.0".to_string(),
        second_language_writing: "5.5".to_string(),
        work_experience: "4-5".to_string(),
        marital_status: "married".to_string(),
        spouse_citizen_or_pr: "no".to_string(),
        spouse_accompanying: "yes".to_string(),
        spouse_canadian_work: "yes".to_string(),
        ..FswpProfile::default()
    }
}

#[test]
fn french_first_language_profile_passes() {
    let result = FswpEngine::new()
        .score(&french_speaking_engineer())
        .expect("profile scores");
    let breakdown = &result.breakdown;

    // NCLC 9, 9, 8, 8
    assert_eq!(breakdown.language.first_language.total, 6 + 6 + 5 + 5);
    assert_eq!(breakdown.language.second_language.points, 4);
    assert_eq!(breakdown.education, 22);
    assert_eq!(breakdown.experience, 13);
    assert_eq!(breakdown.age, 9);
    assert_eq!(breakdown.adaptability.spouse_canadian_work, 5);
    assert_eq!(breakdown.adaptability.total, 5);
    assert_eq!(result.total, 22 + 4 + 22 + 13 + 9 + 5);
    assert!(breakdown.eligibility.meets_pass_mark);
    assert!(breakdown.eligibility.meets_language_minimum);
    breakdown.verify().expect("breakdown adds up");
}

#[test]
fn age_points_reach_zero_at_forty_seven() {
    let engine = FswpEngine::new();
    let age_points = |age: &str| {
        let profile = FswpProfile {
            age: age.to_string(),
            ..FswpProfile::default()
        };
        engine.score(&profile).expect("scores").breakdown.age
    };

    assert_eq!(age_points("17"), 0);
    assert_eq!(age_points("18"), 12);
    assert_eq!(age_points("35"), 12);
    assert_eq!(age_points("36"), 11);
    assert_eq!(age_points("46"), 1);
    assert_eq!(age_points("47"), 0);
}

#[test]
fn profile_errors_identify_the_field() {
    let profile = FswpProfile {
        work_experience: "ten years".to_string(),
        ..french_speaking_engineer()
    };
    let error = FswpEngine::new()
        .score(&profile)
        .expect_err("unrecognized band");

    assert_eq!(error.field(), "work_experience");
    assert!(matches!(error, ProfileError::UnrecognizedOption { .. }));
}
