use chrono::{Local, NaiveDate};
use clap::Args;
use pointscore::error::AppError;
use pointscore::scoring::breakdown::{LanguageScore, ThresholdLanguageScore};
use pointscore::scoring::router::ScoreResponse;
use pointscore::scoring::{BatchOutcome, OptionSet, ProfileBatch};
use pointscore::{
    CrsBreakdown, CrsEngine, CrsProfile, FswpBreakdown, FswpEngine, FswpProfile, PointsSystem,
    ScoreResult, ScoringSystem,
};
use serde::Serialize;
use std::path::PathBuf;

use crate::infra::{load_profile, parse_date, parse_system};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Point system to apply (crs or fswp)
    #[arg(long, value_parser = parse_system)]
    pub(crate) system: ScoringSystem,
    /// JSON file holding the questionnaire answers
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Derive the age answer from this birth date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) date_of_birth: Option<NaiveDate>,
    /// Date the age is computed on (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the full result as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// Point system to apply (crs or fswp)
    #[arg(long, value_parser = parse_system)]
    pub(crate) system: ScoringSystem,
    /// CSV file whose headers are profile field names
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Print the per-row results as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        system,
        profile,
        date_of_birth,
        as_of,
        json,
    } = args;

    let today = Local::now().date_naive();
    let raw = std::fs::read_to_string(profile)?;
    let as_of = as_of.unwrap_or(today);

    match system {
        ScoringSystem::Crs => {
            let profile: CrsProfile = load_profile(&raw, date_of_birth, as_of)?;
            let result = CrsEngine::new().score(&profile)?;
            if json {
                print_json(system, today, result)?;
            } else {
                render_crs(&result);
            }
        }
        ScoringSystem::Fswp => {
            let profile: FswpProfile = load_profile(&raw, date_of_birth, as_of)?;
            let result = FswpEngine::new().score(&profile)?;
            if json {
                print_json(system, today, result)?;
            } else {
                render_fswp(&result);
            }
        }
    }

    Ok(())
}

pub(crate) fn run_batch(args: BatchArgs) -> Result<(), AppError> {
    let batch = ProfileBatch::from_path(&args.csv, args.system)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&batch)?);
        return Ok(());
    }

    println!(
        "{} batch: {} rows | {} scored | {} rejected",
        batch.system.label(),
        batch.entries.len(),
        batch.scored(),
        batch.rejected()
    );
    for entry in &batch.entries {
        let reference = entry.reference.as_deref().unwrap_or("-");
        match &entry.outcome {
            BatchOutcome::Scored { total } => {
                println!("  row {:>4} {:<16} {:>5}", entry.row, reference, total)
            }
            BatchOutcome::Rejected { error, .. } => {
                println!("  row {:>4} {:<16} rejected: {}", entry.row, reference, error)
            }
        }
    }

    Ok(())
}

fn print_json<B: Serialize>(
    system: ScoringSystem,
    evaluated_on: NaiveDate,
    result: ScoreResult<B>,
) -> Result<(), AppError> {
    let response = ScoreResponse {
        system,
        evaluated_on,
        total: result.total,
        breakdown: result.breakdown,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

pub(crate) fn render_crs(result: &ScoreResult<CrsBreakdown>) {
    let breakdown = &result.breakdown;
    println!("Comprehensive Ranking System score: {}", result.total);

    let core = &breakdown.core;
    println!("- Core human capital: {}", core.total);
    println!("    age {} | education {}", core.age, core.education);
    render_language("first official language", &core.language);
    render_language("second official language", &core.second_language);
    println!(
        "    Canadian work experience {}",
        core.canadian_work_experience
    );

    let spouse = &breakdown.spouse;
    println!("- Spouse or common-law partner: {}", spouse.total);
    if spouse.total > 0 {
        println!(
            "    education {} | Canadian work experience {}",
            spouse.education, spouse.canadian_work_experience
        );
        render_language("spouse language", &spouse.language);
    }

    let transferability = &breakdown.transferability;
    println!(
        "- Skill transferability: {} (raw {}, cap {})",
        transferability.total, transferability.raw, transferability.cap
    );
    println!(
        "    education: {} + {} -> {}",
        transferability.education.with_language,
        transferability.education.with_canadian_work_experience,
        transferability.education.total
    );
    println!(
        "    foreign work experience: {} + {} -> {}",
        transferability.foreign_work_experience.with_language,
        transferability
            .foreign_work_experience
            .with_canadian_work_experience,
        transferability.foreign_work_experience.total
    );
    println!(
        "    certificate of qualification {}",
        transferability.certificate_of_qualification
    );

    let additional = &breakdown.additional;
    println!(
        "- Additional points: {} (raw {}, cap {})",
        additional.total, additional.raw, additional.cap
    );
    println!(
        "    nomination {} | job offer {} | Canadian study {} | French {} | sibling {}",
        additional.provincial_nomination,
        additional.arranged_employment,
        additional.canadian_education,
        additional.french_language,
        additional.sibling_in_canada
    );
}

pub(crate) fn render_fswp(result: &ScoreResult<FswpBreakdown>) {
    let breakdown = &result.breakdown;
    let eligibility = &breakdown.eligibility;
    println!(
        "Federal Skilled Worker score: {} / pass mark {} ({})",
        result.total,
        eligibility.pass_mark,
        if eligibility.meets_pass_mark {
            "meets"
        } else {
            "below"
        }
    );
    if !eligibility.meets_language_minimum {
        println!("  first official language is below the CLB 7 minimum in at least one skill");
    }

    println!("- Language: {}", breakdown.language.total);
    render_language("first official language", &breakdown.language.first_language);
    render_threshold("second official language", &breakdown.language.second_language);
    println!("- Education: {}", breakdown.education);
    println!("- Experience: {}", breakdown.experience);
    println!("- Age: {}", breakdown.age);
    println!("- Arranged employment: {}", breakdown.arranged_employment);

    let adaptability = &breakdown.adaptability;
    println!(
        "- Adaptability: {} (raw {}, cap {})",
        adaptability.total, adaptability.raw, adaptability.cap
    );
}

fn render_language(label: &str, score: &LanguageScore) {
    let Some(test) = score.test else {
        println!("    {label}: no test");
        return;
    };

    let skills = [
        ("S", &score.speaking),
        ("L", &score.listening),
        ("R", &score.reading),
        ("W", &score.writing),
    ]
    .iter()
    .map(|(name, skill)| match skill.clb {
        Some(clb) => format!("{name} CLB{} {}", clb.level(), skill.points),
        None => format!("{name} - 0"),
    })
    .collect::<Vec<_>>()
    .join(" | ");

    println!(
        "    {label} ({}): {} [{}]",
        test.label(),
        score.total,
        skills
    );
}

fn render_threshold(label: &str, score: &ThresholdLanguageScore) {
    match score.test {
        Some(_) => println!(
            "    {label}: {} (all skills at CLB {} or higher)",
            score.points,
            score.threshold.level()
        ),
        None => println!("    {label}: no test"),
    }
}
