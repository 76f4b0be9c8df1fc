//! API query and error types.
//!
//! Query field names match the scenario TOML keys.

use serde::{Deserialize, Serialize};

use crate::config::{CarbonConfig, PrivacyConfig, TariffConfig};
use crate::tariff::{Market, PricingScheme};

/// Overrides for the `[tariff]` section.
#[derive(Debug, Default, Deserialize)]
pub struct TariffQuery {
    pub market: Option<Market>,
    pub scheme: Option<PricingScheme>,
    pub threshold: Option<f64>,
    pub flex_pct: Option<u32>,
    pub seed: Option<u64>,
}

impl TariffQuery {
    /// Applies the overrides to `base`.
    ///
    /// Switching market drops the base scheme and threshold, since those are
    /// expressed in the old market's terms.
    pub fn apply(&self, base: &TariffConfig) -> TariffConfig {
        let mut cfg = base.clone();
        if let Some(market) = self.market
            && market != base.market
        {
            cfg.market = market;
            cfg.scheme = None;
            cfg.threshold = None;
        }
        if self.scheme.is_some() {
            cfg.scheme = self.scheme;
        }
        if self.threshold.is_some() {
            cfg.threshold = self.threshold;
        }
        cfg.flex_pct = self.flex_pct.unwrap_or(cfg.flex_pct);
        cfg.seed = self.seed.unwrap_or(cfg.seed);
        cfg
    }
}

/// Overrides for the `[privacy]` section.
#[derive(Debug, Default, Deserialize)]
pub struct PrivacyQuery {
    pub synthetic_rows: Option<usize>,
    pub seed: Option<u64>,
}

impl PrivacyQuery {
    pub fn apply(&self, base: &PrivacyConfig) -> PrivacyConfig {
        PrivacyConfig {
            synthetic_rows: self.synthetic_rows.unwrap_or(base.synthetic_rows),
            seed: self.seed.unwrap_or(base.seed),
        }
    }
}

/// Overrides for the `[carbon]` section.
#[derive(Debug, Default, Deserialize)]
pub struct CarbonQuery {
    pub duration: Option<usize>,
    pub earliest_start: Option<usize>,
    pub latest_end: Option<usize>,
    pub now_hour: Option<usize>,
}

impl CarbonQuery {
    pub fn apply(&self, base: &CarbonConfig) -> CarbonConfig {
        CarbonConfig {
            duration: self.duration.unwrap_or(base.duration),
            earliest_start: self.earliest_start.unwrap_or(base.earliest_start),
            latest_end: self.latest_end.unwrap_or(base.latest_end),
            now_hour: self.now_hour.or(base.now_hour),
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
