//! Immutable point schedules and language equivalency charts.
//!
//! Everything here is `static` data built at compile time and shared by every call.

pub mod crs;
pub mod fswp;
pub mod language;

pub use crs::{CrsSchedule, Household, PairingGrid, Points, CRS_SCHEDULE};
pub use fswp::{FswpSchedule, FSWP_SCHEDULE};
pub use language::{table_for, Clb, Skill, TestTable};
