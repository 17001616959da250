//! CSV batch scoring.
//!
//! Headers are profile field names; an optional `reference` column is echoed back so
//! callers can match rows to applicants. Profile problems are reported per row, while a
//! malformed file aborts the whole import.

use std::io::Read;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use super::profile::ProfileFields;
use super::{CrsEngine, FswpEngine, PointsSystem, ScoringSystem};

const REFERENCE_COLUMN: &str = "reference";

#[derive(Debug, thiserror::Error)]
pub enum ProfileImportError {
    #[error("failed to read profile CSV: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid profile CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("column '{column}' is not a {system} profile field")]
    UnknownColumn {
        column: String,
        system: &'static str,
    },
    #[error("batch exceeds the limit of {limit} rows")]
    TooManyRows { limit: usize },
}

/// Result for one data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum BatchOutcome {
    Scored { total: u16 },
    Rejected { error: String, field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    /// 1-based data row, not counting the header line.
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(flatten)]
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    pub fn total(&self) -> Option<u16> {
        match self.outcome {
            BatchOutcome::Scored { total } => Some(total),
            BatchOutcome::Rejected { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileBatch {
    pub system: ScoringSystem,
    pub entries: Vec<BatchEntry>,
}

impl ProfileBatch {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        system: ScoringSystem,
    ) -> Result<Self, ProfileImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, system)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        system: ScoringSystem,
    ) -> Result<Self, ProfileImportError> {
        Self::read(reader, system, None)
    }

    /// Score every row, failing with `TooManyRows` once more than `limit` rows are seen.
    pub fn read<R: Read>(
        reader: R,
        system: ScoringSystem,
        limit: Option<usize>,
    ) -> Result<Self, ProfileImportError> {
        match system {
            ScoringSystem::Crs => Self::read_with(&CrsEngine::new(), reader, limit),
            ScoringSystem::Fswp => Self::read_with(&FswpEngine::new(), reader, limit),
        }
    }

    /// Score every row with a specific engine instance.
    pub fn read_with<S: PointsSystem, R: Read>(
        engine: &S,
        reader: R,
        limit: Option<usize>,
    ) -> Result<Self, ProfileImportError> {
        let batch = ProfileBatch {
            system: S::SYSTEM,
            entries: score_rows(engine, reader, limit)?,
        };
        info!(
            system = batch.system.id(),
            rows = batch.entries.len(),
            rejected = batch.rejected(),
            "profile batch scored"
        );
        Ok(batch)
    }

    pub fn scored(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.total().is_some())
            .count()
    }

    pub fn rejected(&self) -> usize {
        self.entries.len() - self.scored()
    }
}

fn score_rows<S: PointsSystem, R: Read>(
    engine: &S,
    reader: R,
    limit: Option<usize>,
) -> Result<Vec<BatchEntry>, ProfileImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let reference_column = headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(REFERENCE_COLUMN));

    let profile_columns = (0..headers.len())
        .filter(|column| Some(*column) != reference_column)
        .collect::<Vec<_>>();
    let profile_headers = profile_columns
        .iter()
        .filter_map(|column| headers.get(*column))
        .collect::<csv::StringRecord>();
    if let Some(column) = profile_headers
        .iter()
        .find(|header| !<S::Profile as ProfileFields>::accepts(header))
    {
        return Err(ProfileImportError::UnknownColumn {
            column: column.to_string(),
            system: S::SYSTEM.id(),
        });
    }

    let mut entries = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        if let Some(limit) = limit {
            if index >= limit {
                return Err(ProfileImportError::TooManyRows { limit });
            }
        }

        let reference = reference_column
            .and_then(|column| record.get(column))
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        let answers = profile_columns
            .iter()
            .map(|column| record.get(*column).unwrap_or_default())
            .collect::<csv::StringRecord>();
        let profile: S::Profile = answers.deserialize(Some(&profile_headers))?;
        let outcome = match engine.score(&profile) {
            Ok(result) => BatchOutcome::Scored {
                total: result.total,
            },
            Err(error) => BatchOutcome::Rejected {
                field: error.field(),
                error: error.to_string(),
            },
        };

        entries.push(BatchEntry {
            row: index + 1,
            reference,
            outcome,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CRS_ROWS: &str = "\
reference,age,education,first_language_test,first_language_speaking,first_language_listening,first_language_reading,first_language_writing,provincial_nomination
A-1,29,masters,ielts,7.0,8.0,7.0,7.0,no
A-2,29,masters,ielts,7.0,8.0,7.0,7.0,yes
A-3,29,phd,,,,,,
";

    #[test]
    fn scores_each_row_and_keeps_references() {
        let batch =
            ProfileBatch::from_reader(Cursor::new(CRS_ROWS), ScoringSystem::Crs).expect("imports");

        assert_eq!(batch.entries.len(), 3);
        assert_eq!(batch.entries[0].reference.as_deref(), Some("A-1"));
        let first = batch.entries[0].total().expect("first row scores");
        let second = batch.entries[1].total().expect("second row scores");
        assert_eq!(second - first, 600);

        match &batch.entries[2].outcome {
            BatchOutcome::Rejected { field, .. } => assert_eq!(*field, "education"),
            other => panic!("expected a rejected row, got {other:?}"),
        }
        assert_eq!(batch.scored(), 2);
        assert_eq!(batch.rejected(), 1);
    }

    #[test]
    fn enforces_the_row_limit() {
        let error = ProfileBatch::read(Cursor::new(CRS_ROWS), ScoringSystem::Crs, Some(2))
            .expect_err("three rows exceed a limit of two");
        assert!(matches!(error, ProfileImportError::TooManyRows { limit: 2 }));
    }

    #[test]
    fn misspelled_header_aborts_the_import() {
        let csv = "reference,age,education,provincal_nomination\nA-1,29,masters,yes\n";
        let error = ProfileBatch::from_reader(Cursor::new(csv), ScoringSystem::Crs)
            .expect_err("unknown column");

        match error {
            ProfileImportError::UnknownColumn { column, system } => {
                assert_eq!(column, "provincal_nomination");
                assert_eq!(system, "crs");
            }
            other => panic!("expected an unknown column, got {other:?}"),
        }
    }

    #[test]
    fn columns_from_the_other_system_are_refused() {
        let error = ProfileBatch::from_reader(Cursor::new(CRS_ROWS), ScoringSystem::Fswp)
            .expect_err("provincial_nomination is a CRS field");
        assert!(error.to_string().contains("provincial_nomination"));
    }

    #[test]
    fn reference_column_may_sit_anywhere() {
        let csv = "age,Reference,education\n29,B-7,masters\n";
        let batch =
            ProfileBatch::from_reader(Cursor::new(csv), ScoringSystem::Crs).expect("imports");

        assert_eq!(batch.entries[0].reference.as_deref(), Some("B-7"));
        assert!(batch.entries[0].total().is_some());
    }

    #[test]
    fn ragged_rows_abort_the_import() {
        let csv = "age,education\n29,masters,extra\n";
        let error = ProfileBatch::from_reader(Cursor::new(csv), ScoringSystem::Fswp)
            .expect_err("unequal row length");
        assert!(matches!(error, ProfileImportError::Csv(_)));
    }
}
