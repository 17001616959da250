mod rules;

use tracing::debug;

use super::breakdown::CrsBreakdown;
use super::normalizer::{normalize_crs, NormalizedCrsProfile, ProfileError};
use super::profile::CrsProfile;
use super::tables::{CrsSchedule, CRS_SCHEDULE};
use super::{PointsSystem, ScoreResult, ScoringSystem};

/// Stateless Comprehensive Ranking System calculator over a static schedule.
#[derive(Debug, Clone, Copy)]
pub struct CrsEngine {
    schedule: &'static CrsSchedule,
}

impl CrsEngine {
    pub fn new() -> Self {
        Self::with_schedule(&CRS_SCHEDULE)
    }

    pub fn with_schedule(schedule: &'static CrsSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &'static CrsSchedule {
        self.schedule
    }

    /// Score a profile that has already been normalized.
    pub fn score_normalized(&self, profile: &NormalizedCrsProfile) -> CrsBreakdown {
        let schedule = self.schedule;
        let mut breakdown = CrsBreakdown {
            household: profile.household,
            core: rules::core_factors(profile, schedule),
            spouse: rules::spouse_factors(profile, schedule),
            transferability: rules::skill_transferability(profile, schedule),
            additional: rules::additional_points(profile, schedule),
            total: 0,
        };
        breakdown.apply_caps();
        breakdown
    }
}

impl Default for CrsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PointsSystem for CrsEngine {
    type Profile = CrsProfile;
    type Breakdown = CrsBreakdown;

    const SYSTEM: ScoringSystem = ScoringSystem::Crs;

    fn score(&self, profile: &CrsProfile) -> Result<ScoreResult<CrsBreakdown>, ProfileError> {
        let normalized = normalize_crs(profile)?;
        let breakdown = self.score_normalized(&normalized);
        debug_assert!(breakdown.verify().is_ok(), "{:?}", breakdown.verify());

        debug!(
            system = Self::SYSTEM.id(),
            household = ?breakdown.household,
            core = breakdown.core.total,
            spouse = breakdown.spouse.total,
            transferability = breakdown.transferability.total,
            additional = breakdown.additional.total,
            total = breakdown.total,
            "profile scored"
        );

        Ok(ScoreResult {
            total: breakdown.total,
            breakdown,
        })
    }
}
