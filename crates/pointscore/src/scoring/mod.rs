//! Immigration point-scoring engines.
//!
//! A raw questionnaire profile flows through the normalizer, the per-section calculators
//! and the capping aggregator, and comes back as a total plus a breakdown whose groups
//! always add up. Engines are stateless; the schedules they read are `static` data.

pub mod batch;
pub mod breakdown;
pub mod crs;
pub mod fswp;
pub mod normalizer;
pub mod options;
pub mod profile;
pub mod router;
pub mod service;
pub mod tables;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use batch::{BatchEntry, BatchOutcome, ProfileBatch, ProfileImportError};
pub use breakdown::{BreakdownMismatch, CrsBreakdown, FswpBreakdown};
pub use crs::CrsEngine;
pub use fswp::FswpEngine;
pub use normalizer::{normalize_crs, normalize_fswp, ProfileError};
pub use options::{catalog, OptionCatalogEntry, OptionSet};
pub use profile::{age_on, CrsProfile, FswpProfile, ProfileFields};
pub use router::score_router;
pub use service::{ScoringService, DEFAULT_MAX_BATCH_ROWS};

/// The two supported point systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringSystem {
    Crs,
    Fswp,
}

impl ScoringSystem {
    pub const ALL: [ScoringSystem; 2] = [ScoringSystem::Crs, ScoringSystem::Fswp];

    pub const fn id(self) -> &'static str {
        match self {
            ScoringSystem::Crs => "crs",
            ScoringSystem::Fswp => "fswp",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ScoringSystem::Crs => "Comprehensive Ranking System",
            ScoringSystem::Fswp => "Federal Skilled Worker Program",
        }
    }
}

impl fmt::Display for ScoringSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown scoring system '{0}' (expected crs or fswp)")]
pub struct UnknownSystem(pub String);

impl FromStr for ScoringSystem {
    type Err = UnknownSystem;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        ScoringSystem::ALL
            .into_iter()
            .find(|system| system.id().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownSystem(value.to_string()))
    }
}

/// Total and breakdown returned for one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreResult<B> {
    pub total: u16,
    pub breakdown: B,
}

/// A point system that scores one kind of questionnaire profile.
pub trait PointsSystem: Send + Sync + 'static {
    type Profile: DeserializeOwned + ProfileFields + Send + 'static;
    type Breakdown: Serialize + Send + 'static;

    const SYSTEM: ScoringSystem;

    fn score(
        &self,
        profile: &Self::Profile,
    ) -> Result<ScoreResult<Self::Breakdown>, ProfileError>;
}
