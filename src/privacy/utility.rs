use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::records::{SyntheticRecord, TariffType};

/// Share of records enrolled in one tariff type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub tariff_type: TariffType,
    pub share: f64,
}

/// Normalized tariff-type distribution over observed categories, in category order.
pub fn tariff_distribution(records: &[SyntheticRecord]) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<TariffType, usize> = BTreeMap::new();
    for r in records {
        *counts.entry(r.tariff_type).or_default() += 1;
    }
    let total = records.len() as f64;
    counts
        .into_iter()
        .map(|(tariff_type, n)| CategoryShare {
            tariff_type,
            share: n as f64 / total,
        })
        .collect()
}

/// Descriptive statistics of daily consumption.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n − 1); zero for a single record.
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

impl ConsumptionStats {
    /// Returns `None` for an empty table.
    pub fn from_records(records: &[SyntheticRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        let n = records.len() as f64;
        let values = records.iter().map(|r| r.total_kwh);
        let mean = values.clone().sum::<f64>() / n;
        let sq: f64 = values.clone().map(|v| (v - mean).powi(2)).sum();
        let std = if records.len() > 1 {
            (sq / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        Some(Self {
            count: records.len(),
            mean,
            std,
            min: values.clone().fold(f64::INFINITY, f64::min),
            max: values.fold(f64::NEG_INFINITY, f64::max),
        })
    }
}

/// Side-by-side marginals of the real and synthetic tables.
///
/// Descriptive only: no statistical test of fidelity is made.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilityComparison {
    pub real_tariffs: Vec<CategoryShare>,
    pub synthetic_tariffs: Vec<CategoryShare>,
    pub real_consumption: Option<ConsumptionStats>,
    pub synthetic_consumption: Option<ConsumptionStats>,
}

impl UtilityComparison {
    pub fn compare(real: &[SyntheticRecord], synthetic: &[SyntheticRecord]) -> Self {
        Self {
            real_tariffs: tariff_distribution(real),
            synthetic_tariffs: tariff_distribution(synthetic),
            real_consumption: ConsumptionStats::from_records(real),
            synthetic_consumption: ConsumptionStats::from_records(synthetic),
        }
    }

    /// Largest absolute difference in tariff share between the two tables.
    pub fn max_tariff_share_gap(&self) -> f64 {
        let share = |shares: &[CategoryShare], t: TariffType| {
            shares
                .iter()
                .find(|s| s.tariff_type == t)
                .map_or(0.0, |s| s.share)
        };
        TariffType::ALL
            .iter()
            .map(|&t| (share(&self.real_tariffs, t) - share(&self.synthetic_tariffs, t)).abs())
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for UtilityComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Utility Checks ---")?;
        writeln!(f, "{:<10} {:>8} {:>10}", "tariff", "real", "synthetic")?;
        for t in TariffType::ALL {
            let find = |shares: &[CategoryShare]| {
                shares
                    .iter()
                    .find(|s| s.tariff_type == t)
                    .map_or(0.0, |s| s.share)
            };
            writeln!(
                f,
                "{:<10} {:>7.1}% {:>9.1}%",
                t.to_string(),
                100.0 * find(&self.real_tariffs),
                100.0 * find(&self.synthetic_tariffs)
            )?;
        }
        for (label, stats) in [
            ("real", &self.real_consumption),
            ("synthetic", &self.synthetic_consumption),
        ] {
            match stats {
                Some(s) => writeln!(
                    f,
                    "total_kWh ({label}): mean {:.2}, std {:.2}, range {:.2}–{:.2} (n={})",
                    s.mean, s.std, s.min, s.max, s.count
                )?,
                None => writeln!(f, "total_kWh ({label}): no records")?,
            }
        }
        write!(f, "Max tariff share gap: {:.1} pp", 100.0 * self.max_tariff_share_gap())
    }
}
