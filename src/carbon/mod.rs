//! Carbon-aware task window scheduling over a daily intensity curve.

pub mod curve;
pub mod window;

pub use curve::{CarbonIntensityCurve, DEFAULT_INTENSITY};
pub use window::{
    BestWindow, IntensityPoint, NowComparison, ScheduleResult, WindowOutcome, WindowRequest,
    compare_now, find_best_window, schedule, timeline,
};
