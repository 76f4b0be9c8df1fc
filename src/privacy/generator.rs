//! Real-like table generation and per-column synthetic resampling.

use std::collections::BTreeMap;

use chrono::Weekday;
use rand::Rng;
use rand::distr::weighted::WeightedIndex;
use rand::seq::IndexedRandom;
use rand_distr::{Distribution, Normal};

use super::records::{HomeType, SyntheticRecord, TariffType};
use crate::error::Result;

/// Size of the real-like table.
pub const REAL_RECORD_COUNT: usize = 50;

/// Default size of the synthetic table.
pub const DEFAULT_SYNTHETIC_COUNT: usize = 150;

const KWH_MEAN: f64 = 12.0;
const KWH_STD: f64 = 3.0;
const KWH_MIN: f64 = 3.0;
const KWH_MAX: f64 = 25.0;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

const TARIFF_WEIGHTS: [(TariffType, f64); 3] = [
    (TariffType::Flat, 0.5),
    (TariffType::Tou, 0.35),
    (TariffType::Cpp, 0.15),
];

const OCCUPANT_WEIGHTS: [(u8, f64); 5] = [(1, 0.15), (2, 0.35), (3, 0.3), (4, 0.15), (5, 0.05)];

const HOME_WEIGHTS: [(HomeType, f64); 3] = [
    (HomeType::Apt, 0.4),
    (HomeType::Detached, 0.4),
    (HomeType::Semi, 0.2),
];

/// Draws `count` values from a weighted categorical distribution.
fn weighted_column<T: Copy, R: Rng + ?Sized>(
    choices: &[(T, f64)],
    count: usize,
    rng: &mut R,
) -> Result<Vec<T>> {
    let index = WeightedIndex::new(choices.iter().map(|(_, w)| *w))?;
    Ok((0..count).map(|_| choices[index.sample(rng)].0).collect())
}

/// Draws `count` values uniformly, with replacement, from observed `values`.
fn resample_column<T: Copy, R: Rng + ?Sized>(values: &[T], count: usize, rng: &mut R) -> Vec<T> {
    (0..count)
        .filter_map(|_| values.choose(rng).copied())
        .collect()
}

/// Generates the real-like table.
///
/// Columns are drawn independently and in order: day (uniform 1–7),
/// total kWh (`N(12, 3)` clipped to `[3, 25]`, 2 decimals), weekday
/// (uniform), tariff type, occupants and home type (weighted).
/// Household ids run from 1 to `count`.
///
/// # Errors
///
/// Returns an error if a distribution cannot be built.
pub fn generate_real<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Result<Vec<SyntheticRecord>> {
    let days: Vec<u8> = (0..count).map(|_| rng.random_range(1..=7)).collect();

    let kwh = Normal::new(KWH_MEAN, KWH_STD)?;
    let totals: Vec<f64> = (0..count)
        .map(|_| round2(kwh.sample(rng).clamp(KWH_MIN, KWH_MAX)))
        .collect();

    let weekdays = resample_column(&WEEKDAYS, count, rng);
    let tariffs = weighted_column(&TARIFF_WEIGHTS, count, rng)?;
    let occupants = weighted_column(&OCCUPANT_WEIGHTS, count, rng)?;
    let homes = weighted_column(&HOME_WEIGHTS, count, rng)?;

    Ok((0..count)
        .map(|i| SyntheticRecord {
            household_id: u32::try_from(i + 1).ok(),
            day: days[i],
            total_kwh: totals[i],
            weekday: weekdays[i],
            tariff_type: tariffs[i],
            occupants: occupants[i],
            home_type: homes[i],
        })
        .collect())
}

/// Resamples a synthetic table of `count` rows from the marginals of `real`.
///
/// Each column is drawn independently with replacement, so synthetic rows
/// need not match any real joint combination. Day, kWh, weekday, occupants
/// and home type are drawn uniformly from the observed values (which
/// reproduces their empirical frequencies). Tariff type is drawn from the
/// distinct observed categories weighted by their observed frequency.
///
/// An empty `real` table yields an empty synthetic table.
///
/// # Errors
///
/// Returns an error if the tariff weights cannot be built.
pub fn resample_synthetic<R: Rng + ?Sized>(
    real: &[SyntheticRecord],
    count: usize,
    rng: &mut R,
) -> Result<Vec<SyntheticRecord>> {
    if real.is_empty() {
        return Ok(Vec::new());
    }

    let column = |f: fn(&SyntheticRecord) -> u8| real.iter().map(f).collect::<Vec<_>>();

    let days = resample_column(&column(|r| r.day), count, rng);
    let real_kwh: Vec<f64> = real.iter().map(|r| r.total_kwh).collect();
    let totals = resample_column(&real_kwh, count, rng);
    let real_weekdays: Vec<Weekday> = real.iter().map(|r| r.weekday).collect();
    let weekdays = resample_column(&real_weekdays, count, rng);

    let mut tariff_counts: BTreeMap<TariffType, usize> = BTreeMap::new();
    for r in real {
        *tariff_counts.entry(r.tariff_type).or_default() += 1;
    }
    let observed: Vec<(TariffType, f64)> = tariff_counts
        .into_iter()
        .map(|(t, n)| (t, n as f64 / real.len() as f64))
        .collect();
    let tariffs = weighted_column(&observed, count, rng)?;

    let occupants = resample_column(&column(|r| r.occupants), count, rng);
    let real_homes: Vec<HomeType> = real.iter().map(|r| r.home_type).collect();
    let homes = resample_column(&real_homes, count, rng);

    Ok((0..count)
        .map(|i| SyntheticRecord {
            household_id: None,
            day: days[i],
            total_kwh: totals[i],
            weekday: weekdays[i],
            tariff_type: tariffs[i],
            occupants: occupants[i],
            home_type: homes[i],
        })
        .collect())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
