mod rules;

use tracing::debug;

use super::breakdown::FswpBreakdown;
use super::normalizer::{normalize_fswp, NormalizedFswpProfile, ProfileError};
use super::profile::FswpProfile;
use super::tables::{FswpSchedule, FSWP_SCHEDULE};
use super::{PointsSystem, ScoreResult, ScoringSystem};

/// Stateless Federal Skilled Worker six-factor calculator.
#[derive(Debug, Clone, Copy)]
pub struct FswpEngine {
    schedule: &'static FswpSchedule,
}

impl FswpEngine {
    pub fn new() -> Self {
        Self::with_schedule(&FSWP_SCHEDULE)
    }

    pub fn with_schedule(schedule: &'static FswpSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &'static FswpSchedule {
        self.schedule
    }

    pub fn score_normalized(&self, profile: &NormalizedFswpProfile) -> FswpBreakdown {
        let schedule = self.schedule;
        let mut breakdown = FswpBreakdown {
            language: rules::language(profile, schedule),
            education: rules::education(profile, schedule),
            experience: rules::experience(profile, schedule),
            age: rules::age(profile, schedule),
            arranged_employment: rules::arranged_employment(profile, schedule),
            adaptability: rules::adaptability(profile, schedule),
            eligibility: rules::eligibility(profile, schedule),
            total: 0,
        };
        breakdown.apply_caps();
        breakdown
    }
}

impl Default for FswpEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PointsSystem for FswpEngine {
    type Profile = FswpProfile;
    type Breakdown = FswpBreakdown;

    const SYSTEM: ScoringSystem = ScoringSystem::Fswp;

    fn score(&self, profile: &FswpProfile) -> Result<ScoreResult<FswpBreakdown>, ProfileError> {
        let normalized = normalize_fswp(profile)?;
        let breakdown = self.score_normalized(&normalized);
        debug_assert!(breakdown.verify().is_ok(), "{:?}", breakdown.verify());

        debug!(
            system = Self::SYSTEM.id(),
            language = breakdown.language.total,
            adaptability_raw = breakdown.adaptability.raw,
            total = breakdown.total,
            meets_pass_mark = breakdown.eligibility.meets_pass_mark,
            meets_language_minimum = breakdown.eligibility.meets_language_minimum,
            "profile scored"
        );

        Ok(ScoreResult {
            total: breakdown.total,
            breakdown,
        })
    }
}
