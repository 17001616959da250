use crate::infra::parse_date;
use crate::report::{render_crs, render_fswp};
use chrono::{Local, NaiveDate};
use clap::Args;
use pointscore::error::AppError;
use pointscore::scoring::age_on;
use pointscore::{
    CrsEngine, CrsProfile, FswpEngine, FswpProfile, PointsSystem, ProfileError, ScoringSystem,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date the sample applicants' ages are computed on (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Only score the sample for one system
    #[arg(long, value_parser = crate::infra::parse_system)]
    pub(crate) system: Option<ScoringSystem>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let as_of = args.as_of.unwrap_or_else(|| Local::now().date_naive());
    let systems = match args.system {
        Some(system) => vec![system],
        None => ScoringSystem::ALL.to_vec(),
    };

    for (index, system) in systems.into_iter().enumerate() {
        if index > 0 {
            println!();
        }
        match system {
            ScoringSystem::Crs => {
                let result = CrsEngine::new().score(&sample_crs_profile(as_of)?)?;
                println!("Sample Express Entry couple, evaluated on {as_of}");
                render_crs(&result);
            }
            ScoringSystem::Fswp => {
                let result = FswpEngine::new().score(&sample_fswp_profile(as_of)?)?;
                println!("Sample Federal Skilled Worker applicant, evaluated on {as_of}");
                render_fswp(&result);
            }
        }
    }

    Ok(())
}

fn sample_age(date_of_birth: NaiveDate, as_of: NaiveDate) -> Result<String, ProfileError> {
    age_on(date_of_birth, as_of)
        .map(|age| age.to_string())
        .ok_or_else(|| ProfileError::InvalidAge {
            field: "date_of_birth",
            value: date_of_birth.to_string(),
        })
}

/// Married applicant with an accompanying spouse, a Canadian diploma and some work history.
pub(crate) fn sample_crs_profile(as_of: NaiveDate) -> Result<CrsProfile, ProfileError> {
    let date_of_birth = NaiveDate::from_ymd_opt(1994, 3, 12).unwrap_or_default();

    Ok(CrsProfile {
        marital_status: "married".to_string(),
        spouse_citizen_or_pr: "no".to_string(),
        spouse_accompanying: "yes".to_string(),
        age: sample_age(date_of_birth, as_of)?,
        education: "masters".to_string(),
        canadian_credential: "one-or-two-year".to_string(),
        first_language_test: "ielts".to_string(),
        first_language_speaking: "7.0".to_string(),
        first_language_listening: "8.0".to_string(),
        first_language_reading: "7.0".to_string(),
        first_language_writing: "7.0".to_string(),
        canadian_work_experience: "1".to_string(),
        foreign_work_experience: "3+".to_string(),
        spouse_education: "bachelors".to_string(),
        spouse_language_test: "celpip".to_string(),
        spouse_language_speaking: "7".to_string(),
        spouse_language_listening: "7".to_string(),
        spouse_language_reading: "6".to_string(),
        spouse_language_writing: "7".to_string(),
        ..CrsProfile::default()
    })
}

/// Single applicant with a master's degree and six years of skilled work abroad.
pub(crate) fn sample_fswp_profile(as_of: NaiveDate) -> Result<FswpProfile, ProfileError> {
    let date_of_birth = NaiveDate::from_ymd_opt(1991, 9, 1).unwrap_or_default();

    Ok(FswpProfile {
        marital_status: "single".to_string(),
        age: sample_age(date_of_birth, as_of)?,
        education: "masters".to_string(),
        first_language_test: "celpip".to_string(),
        first_language_speaking: "9".to_string(),
        first_language_listening: "8".to_string(),
        first_language_reading: "8".to_string(),
        first_language_writing: "9".to_string(),
        second_language_test: "tef".to_string(),
        second_language_speaking: "320".to_string(),
        second_language_listening: "260".to_string(),
        second_language_reading: "220".to_string(),
        second_language_writing: "320".to_string(),
        work_experience: "6+".to_string(),
        canadian_study: "yes".to_string(),
        ..FswpProfile::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluation_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
    }

    #[test]
    fn sample_profiles_score_cleanly() {
        let crs = CrsEngine::new()
            .score(&sample_crs_profile(evaluation_date()).expect("sample builds"))
            .expect("sample scores");
        assert!(crs.total > 0);
        assert!(crs.breakdown.spouse.total > 0);
        crs.breakdown.verify().expect("consistent");

        let fswp = FswpEngine::new()
            .score(&sample_fswp_profile(evaluation_date()).expect("sample builds"))
            .expect("sample scores");
        assert!(fswp.breakdown.eligibility.meets_pass_mark);
        assert_eq!(fswp.breakdown.language.second_language.points, 4);
    }

    #[test]
    fn sample_ages_follow_the_evaluation_date() {
        let profile = sample_crs_profile(evaluation_date()).expect("sample builds");
        assert_eq!(profile.age, "30");

        let profile = sample_crs_profile(
            NaiveDate::from_ymd_opt(2025, 3, 12).expect("valid date"),
        )
        .expect("sample builds");
        assert_eq!(profile.age, "31");
    }

    #[test]
    fn evaluation_date_before_birth_is_rejected() {
        let error = sample_fswp_profile(NaiveDate::from_ymd_opt(1980, 1, 1).expect("valid date"))
            .expect_err("not yet born");
        assert_eq!(error.field(), "date_of_birth");
    }

    #[test]
    fn demo_runs_for_a_single_system() {
        run_demo(DemoArgs {
            as_of: Some(evaluation_date()),
            system: Some(ScoringSystem::Fswp),
        })
        .expect("demo runs");
    }
}
