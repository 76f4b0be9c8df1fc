//! Hourly tariff tables per market and scheme.

use serde::Serialize;

use super::market::{Market, PricingScheme};

/// Number of hourly rates in a schedule.
pub const HOURS_PER_DAY: usize = 24;

const GENERIC_FLAT: f64 = 0.12;
const GENERIC_OFF_PEAK: f64 = 0.08;
const GENERIC_PEAK: f64 = 0.18;
const GENERIC_CPP_SPIKE: f64 = 0.35;
const GENERIC_CPP_HOURS: [usize; 3] = [17, 18, 19];

const MAHARASHTRA_FLAT: f64 = 8.50;
const MAHARASHTRA_BASE: f64 = 6.80;
const MAHARASHTRA_PEAK: f64 = 11.05;
const MAHARASHTRA_CPP_SPIKE: f64 = 28.0;
const MAHARASHTRA_CPP_HOURS: [usize; 3] = [18, 19, 20];

/// One rate per hour of day, indexed 0–23.
///
/// The fixed-size array makes "exactly 24 rates" a type-level invariant.
///
/// # Examples
///
/// ```
/// use tariff_lab::tariff::{Market, PricingScheme, TariffSchedule};
///
/// let cpp = TariffSchedule::for_market(Market::Generic, PricingScheme::CriticalPeak);
/// assert_eq!(cpp.rate_at(18), 0.35);
/// assert_eq!(cpp.rate_at(3), 0.08);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TariffSchedule {
    rates: [f64; HOURS_PER_DAY],
}

impl TariffSchedule {
    pub const fn new(rates: [f64; HOURS_PER_DAY]) -> Self {
        Self { rates }
    }

    /// Same rate for every hour.
    pub const fn flat(rate: f64) -> Self {
        Self::new([rate; HOURS_PER_DAY])
    }

    /// Returns a copy with `hours` overridden to `rate`. Hours beyond 23 are ignored.
    #[must_use]
    pub fn with_spike(mut self, hours: &[usize], rate: f64) -> Self {
        for &h in hours {
            if let Some(slot) = self.rates.get_mut(h) {
                *slot = rate;
            }
        }
        self
    }

    /// Returns a copy with every rate multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(self.rates.map(|r| r * factor))
    }

    /// Looks up the schedule for a market and scheme.
    pub fn for_market(market: Market, scheme: PricingScheme) -> Self {
        match (market, scheme) {
            (Market::Generic, PricingScheme::Flat) => Self::flat(GENERIC_FLAT),
            (Market::Generic, PricingScheme::TimeOfUse) => generic_tou(),
            (Market::Generic, PricingScheme::CriticalPeak) => {
                generic_tou().with_spike(&GENERIC_CPP_HOURS, GENERIC_CPP_SPIKE)
            }
            (Market::Maharashtra, PricingScheme::Flat) => Self::flat(MAHARASHTRA_FLAT),
            (Market::Maharashtra, PricingScheme::TimeOfUse) => maharashtra_tou(),
            (Market::Maharashtra, PricingScheme::CriticalPeak) => {
                maharashtra_tou().with_spike(&MAHARASHTRA_CPP_HOURS, MAHARASHTRA_CPP_SPIKE)
            }
        }
    }

    /// Rate for an hour of day. Hours wrap modulo 24.
    pub fn rate_at(&self, hour: usize) -> f64 {
        self.rates[hour % HOURS_PER_DAY]
    }

    pub fn rates(&self) -> &[f64; HOURS_PER_DAY] {
        &self.rates
    }
}

fn generic_tou() -> TariffSchedule {
    TariffSchedule::new(std::array::from_fn(|h| {
        if h >= 22 || h < 6 {
            GENERIC_OFF_PEAK
        } else if (6..9).contains(&h) || (17..22).contains(&h) {
            GENERIC_PEAK
        } else {
            GENERIC_FLAT
        }
    }))
}

fn maharashtra_tou() -> TariffSchedule {
    TariffSchedule::new(std::array::from_fn(|h| {
        if matches!(h, 6..=9 | 18..=21) {
            MAHARASHTRA_PEAK
        } else {
            MAHARASHTRA_BASE
        }
    }))
}
