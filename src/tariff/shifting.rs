//! Per-day greedy load shifting from high-price to low-price hours.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::profile::HourlyReading;
use super::schedule::TariffSchedule;

/// Largest share of a day's shiftable load a single low-price hour absorbs.
///
/// The cap is a fraction of the day's total, not of the hour's own load, so
/// days with fewer than three low-price hours leave residual load unplaced.
pub const MAX_SHARE_PER_LOW_HOUR: f64 = 0.4;

/// Shifting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftParams {
    /// Hours priced at or above this rate give up their flexible load.
    pub threshold: f64,
    /// Fraction of each hour's consumption that is flexible (0.0–1.0).
    pub flex_fraction: f64,
}

impl ShiftParams {
    /// Creates parameters, clamping `flex_fraction` into `[0.0, 1.0]`.
    pub fn new(threshold: f64, flex_fraction: f64) -> Self {
        Self {
            threshold,
            flex_fraction: flex_fraction.clamp(0.0, 1.0),
        }
    }
}

/// A reading with its rate and flexible/essential split before and after shifting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftedReading {
    #[serde(flatten)]
    pub reading: HourlyReading,
    /// Rate charged for this hour.
    pub rate: f64,
    /// Movable share of the original consumption (kWh).
    pub flexible_kwh: f64,
    /// Fixed share of the original consumption (kWh). `flexible + essential == consumption`.
    pub essential_kwh: f64,
    /// Flexible load charged at this hour after shifting (kWh).
    pub shifted_flexible_kwh: f64,
    /// `essential_kwh + shifted_flexible_kwh`.
    pub total_after_shift_kwh: f64,
}

/// Shifting bookkeeping for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayShift {
    pub date: NaiveDate,
    /// Flexible load removed from high-price hours (kWh).
    pub total_to_shift_kwh: f64,
    /// Flexible load placed into low-price hours (kWh).
    pub total_shifted_kwh: f64,
    /// Removed load that no low-price hour absorbed (kWh).
    pub residual_kwh: f64,
    /// Number of hours priced at or above the threshold.
    pub high_hours: usize,
    /// Number of hours priced below the threshold.
    pub low_hours: usize,
}

/// Result of a full-week shifting run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftOutcome {
    /// Shifted readings in calendar order.
    pub readings: Vec<ShiftedReading>,
    /// Per-day bookkeeping in calendar order.
    pub days: Vec<DayShift>,
    /// Σ consumption × rate.
    pub baseline_cost: f64,
    /// Σ total-after-shift × rate.
    pub shifted_cost: f64,
    /// `baseline_cost - shifted_cost`.
    pub savings: f64,
    /// Σ of all moved flexible load (kWh).
    pub total_shifted_kwh: f64,
}

/// Runs the threshold load-shifting heuristic independently for each calendar day.
///
/// For every day the hours are split into HIGH (rate ≥ threshold) and LOW
/// (rate < threshold). When both sets are non-empty, the flexible load of
/// every HIGH hour is removed and poured into LOW hours cheapest-first, at
/// most [`MAX_SHARE_PER_LOW_HOUR`] of the day's total per hour. Otherwise
/// the day is left untouched.
///
/// Readings are grouped by date and copied per day, so the input order
/// within a day is kept and days come out in calendar order.
pub fn shift_load(
    readings: &[HourlyReading],
    schedule: &TariffSchedule,
    params: ShiftParams,
) -> ShiftOutcome {
    let mut by_day: BTreeMap<NaiveDate, Vec<&HourlyReading>> = BTreeMap::new();
    for r in readings {
        by_day.entry(r.date()).or_default().push(r);
    }

    let mut shifted = Vec::with_capacity(readings.len());
    let mut days = Vec::with_capacity(by_day.len());
    for (date, day) in by_day {
        let (rows, summary) = shift_day(date, &day, schedule, params);
        shifted.extend(rows);
        days.push(summary);
    }

    let baseline_cost: f64 = shifted
        .iter()
        .map(|r| r.reading.consumption_kwh * r.rate)
        .sum();
    let shifted_cost: f64 = shifted
        .iter()
        .map(|r| r.total_after_shift_kwh * r.rate)
        .sum();
    let total_shifted_kwh = days.iter().map(|d| d.total_shifted_kwh).sum();

    ShiftOutcome {
        readings: shifted,
        days,
        baseline_cost,
        shifted_cost,
        savings: baseline_cost - shifted_cost,
        total_shifted_kwh,
    }
}

fn shift_day(
    date: NaiveDate,
    day: &[&HourlyReading],
    schedule: &TariffSchedule,
    params: ShiftParams,
) -> (Vec<ShiftedReading>, DayShift) {
    let rates: Vec<f64> = day.iter().map(|r| schedule.rate_at(r.hour)).collect();
    let flexible: Vec<f64> = day
        .iter()
        .map(|r| r.consumption_kwh * params.flex_fraction)
        .collect();

    let (high, mut low): (Vec<usize>, Vec<usize>) =
        (0..day.len()).partition(|&i| rates[i] >= params.threshold);

    let mut placed = flexible.clone();
    let mut total_to_shift = 0.0;
    let mut total_shifted = 0.0;

    if !high.is_empty() && !low.is_empty() {
        total_to_shift = high.iter().map(|&i| flexible[i]).sum::<f64>();
        for &i in &high {
            placed[i] = 0.0;
        }

        // stable: equal rates keep hour order
        low.sort_by(|&a, &b| rates[a].total_cmp(&rates[b]));

        let cap = total_to_shift * MAX_SHARE_PER_LOW_HOUR;
        let mut remaining = total_to_shift;
        for &i in &low {
            if remaining <= 0.0 {
                break;
            }
            let moved = remaining.min(cap);
            placed[i] += moved;
            remaining -= moved;
            total_shifted += moved;
        }
    }

    let rows = day
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let essential = r.consumption_kwh - flexible[i];
            ShiftedReading {
                reading: (*r).clone(),
                rate: rates[i],
                flexible_kwh: flexible[i],
                essential_kwh: essential,
                shifted_flexible_kwh: placed[i],
                total_after_shift_kwh: essential + placed[i],
            }
        })
        .collect();

    let summary = DayShift {
        date,
        total_to_shift_kwh: total_to_shift,
        total_shifted_kwh: total_shifted,
        residual_kwh: (total_to_shift - total_shifted).max(0.0),
        high_hours: high.len(),
        low_hours: low.len(),
    };

    (rows, summary)
}
