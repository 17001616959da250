use std::io::Write;

use pointscore::scoring::{BatchOutcome, ProfileBatch, ProfileImportError};
use pointscore::ScoringSystem;

const FSWP_CSV: &str = "\
reference,age,education,work_experience,first_language_test,first_language_speaking,first_language_listening,first_language_reading,first_language_writing
P-100,29,bachelors,6+,celpip,9,9,9,9
P-101,52,secondary,1,celpip,7,7,7,7
P-102,29,bachelors,6+,celpip,9,9,9,19
";

#[test]
fn importer_scores_rows_from_a_reader() {
    let batch = ProfileBatch::from_reader(FSWP_CSV.as_bytes(), ScoringSystem::Fswp)
        .expect("import succeeds");

    assert_eq!(batch.system, ScoringSystem::Fswp);
    assert_eq!(batch.entries.len(), 3);
    assert_eq!(batch.entries[0].total(), Some(24 + 21 + 15 + 12));
    assert_eq!(batch.entries[1].total(), Some(16 + 5 + 9));
    assert_eq!(batch.entries[1].row, 2);
    match &batch.entries[2].outcome {
        BatchOutcome::Rejected { field, error } => {
            assert_eq!(*field, "first_language_writing");
            assert!(error.contains("19"));
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[test]
fn importer_reads_files() {
    let path = std::env::temp_dir().join(format!("pointscore-batch-{}.csv", std::process::id()));
    let mut file = std::fs::File::create(&path).expect("create fixture");
    file.write_all(FSWP_CSV.as_bytes()).expect("write fixture");
    drop(file);

    let batch = ProfileBatch::from_path(&path, ScoringSystem::Fswp).expect("import succeeds");
    std::fs::remove_file(&path).ok();

    assert_eq!(batch.scored(), 2);
    assert_eq!(batch.rejected(), 1);
}

#[test]
fn missing_file_is_an_io_error() {
    let error = ProfileBatch::from_path("/nonexistent/profiles.csv", ScoringSystem::Crs)
        .expect_err("file is missing");
    assert!(matches!(error, ProfileImportError::Io(_)));
}

#[test]
fn scoring_system_parses_case_insensitively() {
    assert_eq!("CRS".parse::<ScoringSystem>(), Ok(ScoringSystem::Crs));
    assert_eq!(" fswp ".parse::<ScoringSystem>(), Ok(ScoringSystem::Fswp));
    assert!("express-entry".parse::<ScoringSystem>().is_err());
}
