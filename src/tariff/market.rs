use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Tariff market. Selects the consumption shape, the tariff tables and the
/// price units used for the nudge threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Market {
    /// Generic market priced in currency units per kWh (0.08–0.35).
    #[default]
    Generic,
    /// MSEDCL residential market priced in rupees per kWh (6.80–28.0).
    Maharashtra,
}

impl Market {
    pub const ALL: [Self; 2] = [Self::Generic, Self::Maharashtra];

    /// Default nudge threshold (price at or above which load is shifted).
    pub fn default_threshold(self) -> f64 {
        match self {
            Self::Generic => 0.20,
            Self::Maharashtra => 15.0,
        }
    }

    /// Accepted nudge threshold range.
    pub fn threshold_range(self) -> RangeInclusive<f64> {
        match self {
            Self::Generic => 0.05..=0.40,
            Self::Maharashtra => 5.0..=30.0,
        }
    }

    /// Scheme preselected when a scenario does not name one.
    pub fn default_scheme(self) -> PricingScheme {
        match self {
            Self::Generic | Self::Maharashtra => PricingScheme::CriticalPeak,
        }
    }

    pub fn currency(self) -> &'static str {
        match self {
            Self::Generic => "$",
            Self::Maharashtra => "₹",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => write!(f, "generic"),
            Self::Maharashtra => write!(f, "maharashtra"),
        }
    }
}

/// Hourly pricing scheme offered within a market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingScheme {
    Flat,
    #[serde(alias = "tou")]
    TimeOfUse,
    #[serde(alias = "cpp")]
    CriticalPeak,
}

impl PricingScheme {
    pub const ALL: [Self; 3] = [Self::Flat, Self::TimeOfUse, Self::CriticalPeak];
}

impl fmt::Display for PricingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flat => write!(f, "Flat Rate"),
            Self::TimeOfUse => write!(f, "Time-of-Use"),
            Self::CriticalPeak => write!(f, "Critical Peak"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_inside_range() {
        for market in Market::ALL {
            assert!(market.threshold_range().contains(&market.default_threshold()));
        }
    }

    #[test]
    fn scheme_accepts_short_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            scheme: PricingScheme,
        }
        let w: Result<Wrapper, _> = toml::from_str("scheme = \"cpp\"");
        assert_eq!(w.ok().map(|w| w.scheme), Some(PricingScheme::CriticalPeak));
        let w: Result<Wrapper, _> = toml::from_str("scheme = \"time_of_use\"");
        assert_eq!(w.ok().map(|w| w.scheme), Some(PricingScheme::TimeOfUse));
    }

    #[test]
    fn default_scheme_has_hours_above_default_threshold() {
        use crate::tariff::schedule::TariffSchedule;

        for market in Market::ALL {
            let schedule = TariffSchedule::for_market(market, market.default_scheme());
            let threshold = market.default_threshold();
            assert!(schedule.rates().iter().any(|&r| r >= threshold), "{market}");
            assert!(schedule.rates().iter().any(|&r| r < threshold), "{market}");
        }
    }
}
