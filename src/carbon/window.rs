//! Minimum-average window search under start/end constraints.

use std::fmt;

use serde::Serialize;

use super::curve::CarbonIntensityCurve;

/// Task to place on the intensity curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowRequest {
    /// Task length in hours.
    pub duration: usize,
    /// Earliest allowed start hour.
    pub earliest_start: usize,
    /// Hour by which the task must have finished.
    pub latest_end: usize,
    /// Hour to compare the recommendation against, if any.
    pub now_hour: Option<usize>,
}

/// Lowest-intensity window found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestWindow {
    pub start: usize,
    /// Exclusive end hour (`start + duration`).
    pub end: usize,
    /// Mean intensity over the window (gCO2/kWh).
    pub average: f64,
}

/// Result of a window search. Infeasibility is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WindowOutcome {
    Found(BestWindow),
    Infeasible { advisory: String },
}

impl WindowOutcome {
    pub fn best(&self) -> Option<&BestWindow> {
        match self {
            Self::Found(best) => Some(best),
            Self::Infeasible { .. } => None,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.best().is_some()
    }
}

/// Intensity of running the task immediately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NowComparison {
    pub start: usize,
    /// Mean intensity from `start`, truncated at the last hour of the curve.
    pub average: f64,
    /// `average - best.average`; `None` when no feasible window exists.
    pub savings_vs_best: Option<f64>,
}

/// Finds the window of `duration` hours with the lowest mean intensity.
///
/// Every start in `[earliest, latest - duration]` is tried; the window must
/// fit inside `[earliest, latest)`. `latest` beyond the curve is clamped to
/// the curve length. Ties keep the earliest start.
///
/// # Examples
///
/// ```
/// use tariff_lab::carbon::{CarbonIntensityCurve, WindowOutcome, find_best_window};
///
/// let curve = CarbonIntensityCurve::new(vec![10, 10, 20, 20]);
/// let outcome = find_best_window(&curve, 1, 0, 4);
/// assert_eq!(outcome.best().map(|b| b.start), Some(0));
///
/// let outcome = find_best_window(&CarbonIntensityCurve::default(), 6, 20, 23);
/// assert!(matches!(outcome, WindowOutcome::Infeasible { .. }));
/// ```
pub fn find_best_window(
    curve: &CarbonIntensityCurve,
    duration: usize,
    earliest: usize,
    latest: usize,
) -> WindowOutcome {
    let latest = latest.min(curve.len());
    let fits = earliest
        .checked_add(duration)
        .is_some_and(|end| end <= latest);
    if duration == 0 || !fits {
        return infeasible(duration, earliest, latest);
    }

    let mut best: Option<BestWindow> = None;
    for start in earliest..=latest - duration {
        let Some(average) = curve.mean(start, start + duration) else {
            continue;
        };
        if best.is_none_or(|b| average < b.average) {
            best = Some(BestWindow {
                start,
                end: start + duration,
                average,
            });
        }
    }

    best.map_or_else(|| infeasible(duration, earliest, latest), WindowOutcome::Found)
}

fn infeasible(duration: usize, earliest: usize, latest: usize) -> WindowOutcome {
    WindowOutcome::Infeasible {
        advisory: format!(
            "No feasible {duration}-hour window between {earliest}:00 and {latest}:00. \
             Widen the allowed range or shorten the task."
        ),
    }
}

/// Mean intensity of starting at `now`, compared with the best window.
///
/// Returns `None` when `now` is outside the curve or `duration` is zero.
pub fn compare_now(
    curve: &CarbonIntensityCurve,
    now: usize,
    duration: usize,
    outcome: &WindowOutcome,
) -> Option<NowComparison> {
    if duration == 0 || now >= curve.len() {
        return None;
    }
    let end = now.saturating_add(duration).min(curve.len());
    let average = curve.mean(now, end)?;
    Some(NowComparison {
        start: now,
        average,
        savings_vs_best: outcome.best().map(|b| average - b.average),
    })
}

/// Window search plus the optional "run now" comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleResult {
    pub request: WindowRequest,
    pub outcome: WindowOutcome,
    pub now: Option<NowComparison>,
}

pub fn schedule(curve: &CarbonIntensityCurve, request: WindowRequest) -> ScheduleResult {
    let outcome = find_best_window(
        curve,
        request.duration,
        request.earliest_start,
        request.latest_end,
    );
    let now = request
        .now_hour
        .and_then(|h| compare_now(curve, h, request.duration, &outcome));
    ScheduleResult {
        request,
        outcome,
        now,
    }
}

impl fmt::Display for ScheduleResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Recommended Window ---")?;
        match &self.outcome {
            WindowOutcome::Found(b) => write!(
                f,
                "Best: {}:00–{}:00 | Avg intensity: {:.0} gCO2/kWh",
                b.start, b.end, b.average
            )?,
            WindowOutcome::Infeasible { advisory } => write!(f, "{advisory}")?,
        }
        if let Some(now) = &self.now {
            writeln!(f)?;
            match now.savings_vs_best {
                Some(savings) => write!(
                    f,
                    "If you run now ({}:00), avg intensity is {:.0}. Savings vs best slot: {:.0} gCO2/kWh",
                    now.start, now.average, savings
                )?,
                None => write!(
                    f,
                    "If you run now ({}:00), avg intensity is {:.0}. Set a feasible window to compare savings.",
                    now.start, now.average
                )?,
            }
        }
        Ok(())
    }
}

/// One hour of the intensity timeline, flagged when inside the recommended window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntensityPoint {
    pub hour: usize,
    pub intensity: u32,
    pub recommended: bool,
}

/// Hour-by-hour chart series for `curve` with the recommended window marked.
pub fn timeline(curve: &CarbonIntensityCurve, outcome: &WindowOutcome) -> Vec<IntensityPoint> {
    let best = outcome.best();
    curve
        .values()
        .iter()
        .enumerate()
        .map(|(hour, &intensity)| IntensityPoint {
            hour,
            intensity,
            recommended: best.is_some_and(|b| (b.start..b.end).contains(&hour)),
        })
        .collect()
}
