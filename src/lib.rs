//! Household energy-economics scenario explorer.
//!
//! Three independent pipelines share nothing but the crate:
//! - [`tariff`]: weekly consumption trace, hourly tariffs, billing and load shifting
//! - [`privacy`]: real-like and resampled synthetic tables with k-anonymity checks
//! - [`carbon`]: lowest-intensity window search over a daily carbon curve

#[cfg(feature = "api")]
pub mod api;
/// Carbon-aware task window scheduling.
pub mod carbon;
pub mod config;
pub mod error;
pub mod io;
/// Synthetic household records and re-identification risk.
pub mod privacy;
pub mod runner;
/// Consumption profiles, tariff schedules and load shifting.
pub mod tariff;

pub use error::{Error, Result};
