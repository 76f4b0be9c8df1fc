//! Crate-wide error type.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while loading scenarios, generating data, or writing exports.
///
/// Domain outcomes such as an infeasible scheduling window or a zero
/// baseline bill are not errors; they are represented in the result types.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more configuration fields failed validation.
    #[error("invalid configuration: {}", join_config_errors(.0))]
    InvalidConfig(Vec<ConfigError>),

    /// The scenario source could not be read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid noise distribution: {0}")]
    Noise(#[from] rand_distr::NormalError),

    #[error("invalid category weights: {0}")]
    Weights(#[from] rand::distr::weighted::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias defaulting to the crate [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

fn join_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
