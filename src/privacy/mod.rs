//! Synthetic data generation and k-anonymity risk assessment.

pub mod anonymity;
pub mod generator;
pub mod records;
/// Descriptive real-vs-synthetic utility checks.
pub mod utility;

pub use anonymity::{AnonymityAssessment, k_anonymity, k_anonymity_bucketed};
pub use generator::{generate_real, resample_synthetic};
pub use records::{HomeType, OccupancyBand, SyntheticRecord, TariffType};
pub use utility::UtilityComparison;
