//! CRS and FSWP immigration point scoring, plus the configuration, telemetry and HTTP
//! routing shared by the service binary.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;

pub use scoring::{
    CrsBreakdown, CrsEngine, CrsProfile, FswpBreakdown, FswpEngine, FswpProfile, PointsSystem,
    ProfileError, ScoreResult, ScoringSystem,
};
