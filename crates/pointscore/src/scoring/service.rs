use std::io::Read;

use super::batch::{ProfileBatch, ProfileImportError};
use super::normalizer::ProfileError;
use super::{CrsEngine, FswpEngine, PointsSystem, ScoreResult, ScoringSystem};

pub const DEFAULT_MAX_BATCH_ROWS: usize = 500;

/// Service composing both engines with the batch row limit used by the HTTP layer.
#[derive(Debug, Clone)]
pub struct ScoringService {
    crs: CrsEngine,
    fswp: FswpEngine,
    max_batch_rows: usize,
}

impl ScoringService {
    pub fn new(max_batch_rows: usize) -> Self {
        Self::with_engines(CrsEngine::new(), FswpEngine::new(), max_batch_rows)
    }

    pub fn with_engines(crs: CrsEngine, fswp: FswpEngine, max_batch_rows: usize) -> Self {
        Self {
            crs,
            fswp,
            max_batch_rows,
        }
    }

    pub fn max_batch_rows(&self) -> usize {
        self.max_batch_rows
    }

    /// Score with whichever engine `S` names.
    pub fn score<S>(&self, profile: &S::Profile) -> Result<ScoreResult<S::Breakdown>, ProfileError>
    where
        S: PointsSystem,
        Self: AsRef<S>,
    {
        AsRef::<S>::as_ref(self).score(profile)
    }

    /// Score a CSV batch, refusing more rows than the configured limit.
    pub fn batch<R: Read>(
        &self,
        system: ScoringSystem,
        reader: R,
    ) -> Result<ProfileBatch, ProfileImportError> {
        let limit = Some(self.max_batch_rows);
        match system {
            ScoringSystem::Crs => ProfileBatch::read_with(&self.crs, reader, limit),
            ScoringSystem::Fswp => ProfileBatch::read_with(&self.fswp, reader, limit),
        }
    }
}

impl Default for ScoringService {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BATCH_ROWS)
    }
}

impl AsRef<CrsEngine> for ScoringService {
    fn as_ref(&self) -> &CrsEngine {
        &self.crs
    }
}

impl AsRef<FswpEngine> for ScoringService {
    fn as_ref(&self) -> &FswpEngine {
        &self.fswp
    }
}
