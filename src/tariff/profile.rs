use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::Serialize;

use super::market::Market;
use super::schedule::HOURS_PER_DAY;
use crate::error::Result;

/// Days in the simulated household week.
pub const DAYS_PER_WEEK: usize = 7;

/// Seed used when a scenario does not provide one.
pub const DEFAULT_SEED: u64 = 42;

/// Noisy readings are floored here before rounding.
const MIN_READING_KWH: f64 = 0.1;

/// One metered hour of household consumption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyReading {
    /// Start of the metered hour.
    pub timestamp: NaiveDateTime,
    /// Hour of day (0–23).
    pub hour: usize,
    /// Day-of-week label of `timestamp`.
    pub day_of_week: Weekday,
    /// Energy consumed in the hour (kWh, >= 0).
    pub consumption_kwh: f64,
}

impl HourlyReading {
    /// Builds a reading, deriving hour and weekday from `timestamp`.
    pub fn new(timestamp: NaiveDateTime, consumption_kwh: f64) -> Self {
        Self {
            timestamp,
            hour: timestamp.hour() as usize,
            day_of_week: timestamp.weekday(),
            consumption_kwh,
        }
    }

    /// Calendar day the reading belongs to.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Market-specific shape of a household day.
///
/// Multipliers are applied in order, so overlapping weekend bands compound.
#[derive(Debug, Clone, Copy)]
struct ProfileShape {
    base_kwh: [f64; HOURS_PER_DAY],
    weekend_bands: &'static [(RangeInclusive<usize>, f64)],
    seasonal: fn(usize) -> f64,
    noise_std: f64,
}

static GENERIC_WEEKEND: [(RangeInclusive<usize>, f64); 3] =
    [(6..=11, 0.7), (10..=14, 1.3), (18..=22, 1.2)];

static MAHARASHTRA_WEEKEND: [(RangeInclusive<usize>, f64); 3] =
    [(6..=11, 0.8), (10..=15, 1.4), (18..=22, 1.3)];

fn no_season(_hour: usize) -> f64 {
    1.0
}

/// Summer afternoon cooling peak plus a milder night/early-morning peak.
fn maharashtra_summer(hour: usize) -> f64 {
    if (12..=18).contains(&hour) {
        1.6
    } else if hour >= 22 || hour <= 6 {
        1.2
    } else {
        1.0
    }
}

fn shape(market: Market) -> ProfileShape {
    match market {
        Market::Generic => ProfileShape {
            base_kwh: [
                0.8, 0.7, 0.6, 0.6, 0.7, 1.2, //
                2.5, 3.2, 2.8, 1.8, 1.5, 1.4, //
                1.6, 1.4, 1.3, 1.5, 1.8, 2.2, //
                3.5, 3.8, 3.2, 2.5, 1.8, 1.2,
            ],
            weekend_bands: &GENERIC_WEEKEND,
            seasonal: no_season,
            noise_std: 0.12,
        },
        Market::Maharashtra => ProfileShape {
            base_kwh: [
                0.4, 0.3, 0.2, 0.2, 0.3, 0.5, //
                1.8, 2.4, 2.0, 1.2, 0.9, 0.8, //
                1.1, 0.9, 0.8, 1.0, 1.3, 1.8, //
                3.2, 4.1, 3.8, 2.8, 2.1, 1.5,
            ],
            weekend_bands: &MAHARASHTRA_WEEKEND,
            seasonal: maharashtra_summer,
            noise_std: 0.15,
        },
    }
}

/// First day of the simulated week (Monday 2024-01-01).
pub fn week_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default()
}

/// Generates one synthetic household week (7 × 24 hourly readings).
///
/// Each hour starts from the market's base shape, gets the weekend
/// multipliers on days 5 and 6, the seasonal multiplier, and multiplicative
/// noise drawn from `N(1.0, σ)`. Values are floored at 0.1 kWh and rounded
/// to 2 decimals.
///
/// The generator draws exactly one noise sample per reading from `rng`, so
/// two calls with identically seeded generators yield identical weeks.
///
/// # Errors
///
/// Returns an error if the noise distribution cannot be built.
///
/// # Examples
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use tariff_lab::tariff::{Market, generate_profile};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let week = generate_profile(Market::Generic, &mut rng).unwrap();
/// assert_eq!(week.len(), 168);
/// ```
pub fn generate_profile<R: Rng + ?Sized>(
    market: Market,
    rng: &mut R,
) -> Result<Vec<HourlyReading>> {
    let shape = shape(market);
    let noise = Normal::new(1.0, shape.noise_std)?;
    let start = week_start().and_time(NaiveTime::MIN);

    let mut readings = Vec::with_capacity(DAYS_PER_WEEK * HOURS_PER_DAY);
    for day in 0..DAYS_PER_WEEK {
        let is_weekend = day >= 5;
        for hour in 0..HOURS_PER_DAY {
            let mut kwh = shape.base_kwh[hour];
            if is_weekend {
                for (band, factor) in shape.weekend_bands {
                    if band.contains(&hour) {
                        kwh *= factor;
                    }
                }
            }
            kwh *= (shape.seasonal)(hour);
            kwh = (kwh * noise.sample(rng)).max(MIN_READING_KWH);

            let offset = TimeDelta::hours((day * HOURS_PER_DAY + hour) as i64);
            readings.push(HourlyReading::new(start + offset, round2(kwh)));
        }
    }
    Ok(readings)
}

/// Builds a week of readings with the same consumption every hour.
pub fn constant_profile(consumption_kwh: f64) -> Vec<HourlyReading> {
    let start = week_start().and_time(NaiveTime::MIN);
    (0..DAYS_PER_WEEK * HOURS_PER_DAY)
        .map(|i| HourlyReading::new(start + TimeDelta::hours(i as i64), consumption_kwh))
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn week(market: Market, seed: u64) -> Vec<HourlyReading> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_profile(market, &mut rng).expect("profile should generate")
    }

    #[test]
    fn week_has_168_hourly_readings() {
        for market in Market::ALL {
            let readings = week(market, DEFAULT_SEED);
            assert_eq!(readings.len(), 168);
            for (i, r) in readings.iter().enumerate() {
                assert_eq!(r.hour, i % 24);
            }
        }
    }

    #[test]
    fn week_starts_monday_and_ends_sunday() {
        let readings = week(Market::Generic, DEFAULT_SEED);
        assert_eq!(readings[0].day_of_week, Weekday::Mon);
        assert_eq!(readings[167].day_of_week, Weekday::Sun);
        assert_eq!(readings[0].date(), week_start());
    }

    #[test]
    fn same_seed_same_week() {
        assert_eq!(week(Market::Maharashtra, 7), week(Market::Maharashtra, 7));
    }

    #[test]
    fn different_seed_different_week() {
        assert_ne!(week(Market::Generic, 1), week(Market::Generic, 2));
    }

    #[test]
    fn values_are_floored_and_rounded() {
        for market in Market::ALL {
            for r in week(market, DEFAULT_SEED) {
                assert!(r.consumption_kwh >= MIN_READING_KWH);
                let cents = r.consumption_kwh * 100.0;
                assert!((cents - cents.round()).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn evening_peak_exceeds_night_on_average() {
        let readings = week(Market::Generic, DEFAULT_SEED);
        let mean_at = |hour: usize| {
            let v: Vec<f64> = readings
                .iter()
                .filter(|r| r.hour == hour)
                .map(|r| r.consumption_kwh)
                .collect();
            v.iter().sum::<f64>() / v.len() as f64
        };
        assert!(mean_at(19) > 2.0 * mean_at(3));
    }

    #[test]
    fn maharashtra_seasonal_bands() {
        assert_eq!(maharashtra_summer(12), 1.6);
        assert_eq!(maharashtra_summer(18), 1.6);
        assert_eq!(maharashtra_summer(6), 1.2);
        assert_eq!(maharashtra_summer(22), 1.2);
        assert_eq!(maharashtra_summer(9), 1.0);
    }

    #[test]
    fn constant_profile_spans_the_week() {
        let readings = constant_profile(1.0);
        assert_eq!(readings.len(), 168);
        assert_eq!(readings[25].hour, 1);
        assert_eq!(readings[25].day_of_week, Weekday::Tue);
    }
}
