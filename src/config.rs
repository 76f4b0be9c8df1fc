//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::carbon::WindowRequest;
use crate::privacy::generator::DEFAULT_SYNTHETIC_COUNT;
use crate::tariff::market::{Market, PricingScheme};
use crate::tariff::profile::DEFAULT_SEED;

/// Top-level scenario configuration parsed from TOML.
///
/// All sections have defaults matching the generic preset. Load from TOML
/// with [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::generic`]
/// for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Consumption & tariff simulator parameters.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Synthetic data & k-anonymity parameters.
    #[serde(default)]
    pub privacy: PrivacyConfig,
    /// Carbon-aware scheduler parameters.
    #[serde(default)]
    pub carbon: CarbonConfig,
}

/// Consumption & tariff simulator parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Market variant: `"generic"` or `"maharashtra"`.
    pub market: Market,
    /// Pricing scheme; defaults to the market's preselected scheme.
    pub scheme: Option<PricingScheme>,
    /// Nudge threshold in market price units; defaults per market.
    pub threshold: Option<f64>,
    /// Flexible share of consumption in percent (0–50, steps of 5).
    pub flex_pct: u32,
    /// Seed for the consumption profile generator.
    pub seed: u64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            market: Market::Generic,
            scheme: None,
            threshold: None,
            flex_pct: 25,
            seed: DEFAULT_SEED,
        }
    }
}

impl TariffConfig {
    pub fn effective_scheme(&self) -> PricingScheme {
        self.scheme.unwrap_or_else(|| self.market.default_scheme())
    }

    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or_else(|| self.market.default_threshold())
    }

    /// Flexible share as a fraction (0.0–1.0).
    pub fn flex_fraction(&self) -> f64 {
        f64::from(self.flex_pct) / 100.0
    }
}

/// Synthetic data & k-anonymity parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrivacyConfig {
    /// Number of synthetic rows (50–500, steps of 25).
    pub synthetic_rows: usize,
    /// Seed shared by the real-table draw and the resampling.
    pub seed: u64,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            synthetic_rows: DEFAULT_SYNTHETIC_COUNT,
            seed: DEFAULT_SEED,
        }
    }
}

/// Carbon-aware scheduler parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarbonConfig {
    /// Task duration in hours (1–6).
    pub duration: usize,
    /// Earliest allowed start hour (0–23).
    pub earliest_start: usize,
    /// Latest allowed end hour, inclusive bound (1–24).
    pub latest_end: usize,
    /// Hour to compare against (0–23); omit to skip the comparison.
    pub now_hour: Option<usize>,
}

impl Default for CarbonConfig {
    fn default() -> Self {
        Self {
            duration: 2,
            earliest_start: 8,
            latest_end: 23,
            now_hour: Some(9),
        }
    }
}

impl CarbonConfig {
    pub fn request(&self) -> WindowRequest {
        WindowRequest {
            duration: self.duration,
            earliest_start: self.earliest_start,
            latest_end: self.latest_end,
            now_hour: self.now_hour,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field} - {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"tariff.flex_pct"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the generic-market scenario.
    pub fn generic() -> Self {
        Self::default()
    }

    /// Returns the Maharashtra preset: MSEDCL tariffs with critical-peak pricing.
    pub fn maharashtra() -> Self {
        Self {
            tariff: TariffConfig {
                market: Market::Maharashtra,
                scheme: Some(PricingScheme::CriticalPeak),
                threshold: Some(15.0),
                ..TariffConfig::default()
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["generic", "maharashtra"];

    /// Loads a scenario from a named preset.
    ///
    /// # Arguments
    ///
    /// * `name` - One of [`ScenarioConfig::PRESETS`]
    ///
    /// # Returns
    ///
    /// The preset's scenario, unvalidated.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "generic" => Ok(Self::generic()),
            "maharashtra" => Ok(Self::maharashtra()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to a scenario TOML file
    ///
    /// # Returns
    ///
    /// Parsed scenario with missing sections and fields defaulted.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Arguments
    ///
    /// * `s` - TOML document with optional `[tariff]`, `[privacy]` and `[carbon]` tables
    ///
    /// # Returns
    ///
    /// Parsed scenario with missing sections and fields defaulted.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Overrides every pipeline seed.
    pub fn set_seed(&mut self, seed: u64) {
        self.tariff.seed = seed;
        self.privacy.seed = seed;
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// # Returns
    ///
    /// Every violated constraint, in section order. Empty if the
    /// configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let t = &self.tariff;
        let range = t.market.threshold_range();
        let threshold = t.effective_threshold();
        if !threshold.is_finite() || !range.contains(&threshold) {
            errors.push(ConfigError::new(
                "tariff.threshold",
                format!(
                    "must be in [{}, {}] for the {} market, got {threshold}",
                    range.start(),
                    range.end(),
                    t.market
                ),
            ));
        }
        if t.flex_pct > 50 || t.flex_pct % 5 != 0 {
            errors.push(ConfigError::new(
                "tariff.flex_pct",
                format!("must be a multiple of 5 in [0, 50], got {}", t.flex_pct),
            ));
        }

        let p = &self.privacy;
        if !(50..=500).contains(&p.synthetic_rows) || p.synthetic_rows % 25 != 0 {
            errors.push(ConfigError::new(
                "privacy.synthetic_rows",
                format!(
                    "must be a multiple of 25 in [50, 500], got {}",
                    p.synthetic_rows
                ),
            ));
        }

        let c = &self.carbon;
        if !(1..=6).contains(&c.duration) {
            errors.push(ConfigError::new(
                "carbon.duration",
                format!("must be in [1, 6], got {}", c.duration),
            ));
        }
        if c.earliest_start > 23 {
            errors.push(ConfigError::new(
                "carbon.earliest_start",
                format!("must be in [0, 23], got {}", c.earliest_start),
            ));
        }
        if !(1..=24).contains(&c.latest_end) {
            errors.push(ConfigError::new(
                "carbon.latest_end",
                format!("must be in [1, 24], got {}", c.latest_end),
            ));
        }
        if let Some(now) = c.now_hour
            && now > 23
        {
            errors.push(ConfigError::new(
                "carbon.now_hour",
                format!("must be in [0, 23], got {now}"),
            ));
        }

        errors
    }
}
