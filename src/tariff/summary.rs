//! Bill comparison and savings summaries for display.

use std::fmt;

use serde::Serialize;

use super::billing::bill;
use super::market::{Market, PricingScheme};
use super::profile::HourlyReading;
use super::schedule::TariffSchedule;
use super::shifting::ShiftOutcome;

/// Weeks used to annualize weekly savings.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Weekly bill under one scheme.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemeBill {
    pub scheme: PricingScheme,
    pub cost: f64,
    /// `cost - flat_cost`; zero for the flat scheme itself.
    pub delta_vs_flat: f64,
}

/// Weekly bill of one household under every scheme of its market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillComparison {
    pub market: Market,
    pub bills: Vec<SchemeBill>,
}

impl BillComparison {
    /// Bills `readings` under each scheme of `market`.
    pub fn compute(market: Market, readings: &[HourlyReading]) -> Self {
        let flat_cost = bill(
            readings,
            &TariffSchedule::for_market(market, PricingScheme::Flat),
        );
        let bills = PricingScheme::ALL
            .iter()
            .map(|&scheme| {
                let cost = bill(readings, &TariffSchedule::for_market(market, scheme));
                SchemeBill {
                    scheme,
                    cost,
                    delta_vs_flat: cost - flat_cost,
                }
            })
            .collect();
        Self { market, bills }
    }

    pub fn cost(&self, scheme: PricingScheme) -> Option<f64> {
        self.bills.iter().find(|b| b.scheme == scheme).map(|b| b.cost)
    }
}

impl fmt::Display for BillComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cur = self.market.currency();
        writeln!(f, "--- Weekly Bill Comparison ({}) ---", self.market)?;
        for (i, b) in self.bills.iter().enumerate() {
            let label = format!("{}:", b.scheme);
            write!(f, "{label:<22} {cur}{:.2}", b.cost)?;
            if b.scheme != PricingScheme::Flat {
                write!(f, " ({cur}{:+.2} vs Flat)", b.delta_vs_flat)?;
            }
            if i + 1 < self.bills.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Outcome of load shifting expressed as money and energy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsSummary {
    pub market: Market,
    pub baseline_cost: f64,
    pub shifted_cost: f64,
    /// `baseline_cost - shifted_cost`; may be zero or negative.
    pub savings: f64,
    /// Savings as a percentage of the baseline. `None` when the baseline is zero.
    pub savings_pct: Option<f64>,
    /// Weekly savings × 52.
    pub annual_savings: f64,
    /// Energy moved out of high-price hours (kWh/week).
    pub shifted_kwh: f64,
    /// Energy removed from high-price hours but never placed (kWh/week).
    pub residual_kwh: f64,
}

impl SavingsSummary {
    pub fn from_outcome(market: Market, outcome: &ShiftOutcome) -> Self {
        let savings_pct = if outcome.baseline_cost != 0.0 {
            Some(100.0 * outcome.savings / outcome.baseline_cost)
        } else {
            None
        };
        Self {
            market,
            baseline_cost: outcome.baseline_cost,
            shifted_cost: outcome.shifted_cost,
            savings: outcome.savings,
            savings_pct,
            annual_savings: outcome.savings * WEEKS_PER_YEAR,
            shifted_kwh: outcome.total_shifted_kwh,
            residual_kwh: outcome.days.iter().map(|d| d.residual_kwh).sum(),
        }
    }

    pub fn has_savings(&self) -> bool {
        self.savings > 0.0
    }
}

impl fmt::Display for SavingsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cur = self.market.currency();
        writeln!(f, "--- Demand Response Impact ---")?;
        writeln!(f, "Original bill:         {cur}{:.2}", self.baseline_cost)?;
        writeln!(f, "After load shifting:   {cur}{:.2}", self.shifted_cost)?;
        match self.savings_pct {
            Some(pct) => writeln!(f, "Savings:               {cur}{:.2} ({pct:.1}%)", self.savings)?,
            None => writeln!(f, "Savings:               {cur}{:.2} (undefined %)", self.savings)?,
        }
        writeln!(f, "Energy shifted:        {:.1} kWh", self.shifted_kwh)?;
        if self.residual_kwh > 0.0 {
            writeln!(f, "Unplaced flexible:     {:.1} kWh", self.residual_kwh)?;
        }
        if self.has_savings() {
            write!(f, "Annual savings:        {cur}{:.2}", self.annual_savings)
        } else {
            write!(
                f,
                "Current constraints don't allow for bill savings. \
                 Try adjusting the flexible load percentage or nudge threshold."
            )
        }
    }
}
