//! Pipeline entry points: one function per config section.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::carbon::{CarbonIntensityCurve, IntensityPoint, ScheduleResult, schedule, timeline};
use crate::config::{CarbonConfig, PrivacyConfig, ScenarioConfig, TariffConfig};
use crate::error::{Error, Result};
use crate::privacy::generator::REAL_RECORD_COUNT;
use crate::privacy::{
    AnonymityAssessment, SyntheticRecord, UtilityComparison, generate_real, resample_synthetic,
};
use crate::tariff::{
    BillComparison, Market, PricingScheme, SavingsSummary, ShiftOutcome, ShiftParams,
    TariffSchedule, generate_profile, shift_load,
};

/// Weekly bills and load-shifting impact for one household.
#[derive(Debug, Clone, Serialize)]
pub struct TariffReport {
    pub market: Market,
    pub scheme: PricingScheme,
    pub threshold: f64,
    pub flex_pct: u32,
    /// Hourly rates of the selected scheme.
    pub schedule: TariffSchedule,
    pub bills: BillComparison,
    pub savings: SavingsSummary,
    pub outcome: ShiftOutcome,
}

/// Generates the week, bills it under every scheme and shifts load under the selected one.
///
/// # Arguments
///
/// * `cfg` - Tariff section of a validated scenario
///
/// # Returns
///
/// Bill comparison, savings summary and the shifted week.
///
/// # Errors
///
/// Returns an error if the consumption noise distribution cannot be built.
pub fn run_tariff(cfg: &TariffConfig) -> Result<TariffReport> {
    let scheme = cfg.effective_scheme();
    let threshold = cfg.effective_threshold();
    info!(
        market = %cfg.market,
        %scheme,
        threshold,
        flex_pct = cfg.flex_pct,
        "running tariff simulation"
    );

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let readings = generate_profile(cfg.market, &mut rng)?;
    let schedule = TariffSchedule::for_market(cfg.market, scheme);
    let bills = BillComparison::compute(cfg.market, &readings);
    let outcome = shift_load(
        &readings,
        &schedule,
        ShiftParams::new(threshold, cfg.flex_fraction()),
    );
    let savings = SavingsSummary::from_outcome(cfg.market, &outcome);

    debug!(
        baseline = outcome.baseline_cost,
        shifted = outcome.shifted_cost,
        shifted_kwh = outcome.total_shifted_kwh,
        "load shifting complete"
    );
    if savings.residual_kwh > 0.0 {
        warn!(
            residual_kwh = savings.residual_kwh,
            "flexible load left unplaced by the per-hour cap"
        );
    }

    Ok(TariffReport {
        market: cfg.market,
        scheme,
        threshold,
        flex_pct: cfg.flex_pct,
        schedule,
        bills,
        savings,
        outcome,
    })
}

impl fmt::Display for TariffReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.bills)?;
        writeln!(f)?;
        writeln!(f, "Scheme:                {}", self.scheme)?;
        writeln!(
            f,
            "Nudge threshold:       {}{}",
            self.market.currency(),
            self.threshold
        )?;
        writeln!(f, "Flexible load:         {}%", self.flex_pct)?;
        writeln!(f)?;
        write!(f, "{}", self.savings)
    }
}

/// Real-like and synthetic tables with their privacy and utility checks.
#[derive(Debug, Clone, Serialize)]
pub struct PrivacyReport {
    pub real: Vec<SyntheticRecord>,
    pub synthetic: Vec<SyntheticRecord>,
    pub assessment: AnonymityAssessment,
    pub utility: UtilityComparison,
}

/// Draws the real-like table and resamples a synthetic one from the same generator.
///
/// # Arguments
///
/// * `cfg` - Privacy section of a validated scenario
///
/// # Errors
///
/// Returns an error if a sampling distribution cannot be built.
pub fn run_privacy(cfg: &PrivacyConfig) -> Result<PrivacyReport> {
    info!(rows = cfg.synthetic_rows, seed = cfg.seed, "generating synthetic records");

    let mut rng = StdRng::seed_from_u64(cfg.seed);
    let real = generate_real(REAL_RECORD_COUNT, &mut rng)?;
    let synthetic = resample_synthetic(&real, cfg.synthetic_rows, &mut rng)?;
    let assessment = AnonymityAssessment::assess(&real, &synthetic);
    let utility = UtilityComparison::compare(&real, &synthetic);

    debug!(
        k_real = assessment.k_real,
        k_synthetic = assessment.k_synthetic,
        k_bucketed = assessment.k_synthetic_bucketed,
        "k-anonymity assessed"
    );
    if assessment.k_synthetic_bucketed < 2 {
        warn!("synthetic table still holds unique quasi-identifier groups after bucketing");
    }

    Ok(PrivacyReport {
        real,
        synthetic,
        assessment,
        utility,
    })
}

impl fmt::Display for PrivacyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Real rows: {} | Synthetic rows: {}",
            self.real.len(),
            self.synthetic.len()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.assessment)?;
        writeln!(f)?;
        write!(f, "{}", self.utility)
    }
}

/// Recommended window plus the chart series of the fixed curve.
#[derive(Debug, Clone, Serialize)]
pub struct CarbonReport {
    pub result: ScheduleResult,
    pub timeline: Vec<IntensityPoint>,
}

/// Searches the fixed daily curve for the lowest-intensity window.
pub fn run_carbon(cfg: &CarbonConfig) -> CarbonReport {
    info!(
        duration = cfg.duration,
        earliest = cfg.earliest_start,
        latest = cfg.latest_end,
        "searching carbon-aware window"
    );

    let curve = CarbonIntensityCurve::default();
    let result = schedule(&curve, cfg.request());
    match result.outcome.best() {
        Some(best) => debug!(start = best.start, average = best.average, "window found"),
        None => warn!("no feasible window for the requested range"),
    }
    let timeline = timeline(&curve, &result.outcome);

    CarbonReport { result, timeline }
}

impl fmt::Display for CarbonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.result)
    }
}

/// Reports of every pipeline for one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub tariff: TariffReport,
    pub privacy: PrivacyReport,
    pub carbon: CarbonReport,
}

/// Validates `config` and runs all three pipelines.
///
/// # Errors
///
/// Returns [`Error::InvalidConfig`] listing every violated field, or any
/// error raised by a pipeline.
pub fn run_all(config: &ScenarioConfig) -> Result<ScenarioReport> {
    ensure_valid(config)?;
    Ok(ScenarioReport {
        tariff: run_tariff(&config.tariff)?,
        privacy: run_privacy(&config.privacy)?,
        carbon: run_carbon(&config.carbon),
    })
}

/// Turns validation findings into [`Error::InvalidConfig`].
///
/// # Errors
///
/// Returns an error when at least one field is out of range.
pub fn ensure_valid(config: &ScenarioConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidConfig(errors))
    }
}
