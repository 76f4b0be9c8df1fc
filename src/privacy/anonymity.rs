//! k-anonymity over the quasi-identifier {home type, occupants, tariff type}.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::records::{HomeType, OccupancyBand, SyntheticRecord, TariffType};

/// Counts records per key.
pub fn group_sizes<K, F>(records: &[SyntheticRecord], key: F) -> BTreeMap<K, usize>
where
    K: Ord,
    F: Fn(&SyntheticRecord) -> K,
{
    let mut groups = BTreeMap::new();
    for r in records {
        *groups.entry(key(r)).or_insert(0) += 1;
    }
    groups
}

/// Size of the smallest group, or 0 when there are no records.
fn smallest<K>(groups: &BTreeMap<K, usize>) -> usize {
    groups.values().copied().min().unwrap_or(0)
}

fn raw_key(r: &SyntheticRecord) -> (HomeType, u8, TariffType) {
    (r.home_type, r.occupants, r.tariff_type)
}

fn bucketed_key(r: &SyntheticRecord) -> (HomeType, OccupancyBand, TariffType) {
    (r.home_type, r.occupancy_band(), r.tariff_type)
}

/// k-anonymity on raw occupant counts.
///
/// A result of 1 means at least one record is unique on the
/// quasi-identifier. An empty table has no groups and yields 0.
pub fn k_anonymity(records: &[SyntheticRecord]) -> usize {
    smallest(&group_sizes(records, raw_key))
}

/// k-anonymity with occupants bucketed into 1–2, 3–4 and 5+.
///
/// Bucketing only merges groups, so this is never below [`k_anonymity`]
/// for the same records.
pub fn k_anonymity_bucketed(records: &[SyntheticRecord]) -> usize {
    smallest(&group_sizes(records, bucketed_key))
}

/// Re-identification risk of the real and synthetic tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnonymityAssessment {
    pub k_real: usize,
    pub k_synthetic: usize,
    pub k_synthetic_bucketed: usize,
    /// Number of distinct quasi-identifier groups in the synthetic table.
    pub synthetic_groups: usize,
    /// Synthetic groups holding a single record.
    pub synthetic_unique_groups: usize,
}

impl AnonymityAssessment {
    pub fn assess(real: &[SyntheticRecord], synthetic: &[SyntheticRecord]) -> Self {
        let groups = group_sizes(synthetic, raw_key);
        Self {
            k_real: k_anonymity(real),
            k_synthetic: smallest(&groups),
            k_synthetic_bucketed: k_anonymity_bucketed(synthetic),
            synthetic_groups: groups.len(),
            synthetic_unique_groups: groups.values().filter(|&&n| n == 1).count(),
        }
    }
}

impl fmt::Display for AnonymityAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Privacy Risk: k-Anonymity ---")?;
        writeln!(f, "k-anonymity (real):        {}", self.k_real)?;
        writeln!(f, "k-anonymity (synthetic):   {}", self.k_synthetic)?;
        writeln!(f, "k after bucketing:         {}", self.k_synthetic_bucketed)?;
        write!(
            f,
            "Synthetic groups:          {} ({} unique)",
            self.synthetic_groups, self.synthetic_unique_groups
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::privacy::generator::{generate_real, resample_synthetic};

    fn record(home: HomeType, occupants: u8, tariff: TariffType) -> SyntheticRecord {
        SyntheticRecord {
            household_id: None,
            day: 1,
            total_kwh: 10.0,
            weekday: Weekday::Mon,
            tariff_type: tariff,
            occupants,
            home_type: home,
        }
    }

    #[test]
    fn smallest_group_wins() {
        let records = vec![
            record(HomeType::Apt, 2, TariffType::Flat),
            record(HomeType::Apt, 2, TariffType::Flat),
            record(HomeType::Apt, 2, TariffType::Flat),
            record(HomeType::Semi, 4, TariffType::Tou),
            record(HomeType::Semi, 4, TariffType::Tou),
        ];
        assert_eq!(k_anonymity(&records), 2);
    }

    #[test]
    fn unique_record_gives_k_of_one() {
        let records = vec![
            record(HomeType::Apt, 2, TariffType::Flat),
            record(HomeType::Apt, 2, TariffType::Flat),
            record(HomeType::Detached, 5, TariffType::Cpp),
        ];
        assert_eq!(k_anonymity(&records), 1);
    }

    #[test]
    fn empty_table_has_k_zero() {
        assert_eq!(k_anonymity(&[]), 0);
        assert_eq!(k_anonymity_bucketed(&[]), 0);
    }

    #[test]
    fn bucketing_merges_adjacent_occupant_counts() {
        let records = vec![
            record(HomeType::Apt, 1, TariffType::Flat),
            record(HomeType::Apt, 2, TariffType::Flat),
            record(HomeType::Apt, 3, TariffType::Flat),
            record(HomeType::Apt, 4, TariffType::Flat),
        ];
        assert_eq!(k_anonymity(&records), 1);
        assert_eq!(k_anonymity_bucketed(&records), 2);
    }

    #[test]
    fn bucketing_never_lowers_k() {
        let mut rng = StdRng::seed_from_u64(42);
        let real = generate_real(50, &mut rng).expect("real");
        for n in [50, 150, 300, 500] {
            let syn = resample_synthetic(&real, n, &mut rng).expect("synthetic");
            assert!(k_anonymity_bucketed(&syn) >= k_anonymity(&syn), "n={n}");
        }
        assert!(k_anonymity_bucketed(&real) >= k_anonymity(&real));
    }

    #[test]
    fn assessment_counts_groups() {
        let real = vec![record(HomeType::Apt, 2, TariffType::Flat)];
        let syn = vec![
            record(HomeType::Apt, 2, TariffType::Flat),
            record(HomeType::Apt, 2, TariffType::Flat),
            record(HomeType::Semi, 1, TariffType::Cpp),
        ];
        let a = AnonymityAssessment::assess(&real, &syn);
        assert_eq!(a.k_real, 1);
        assert_eq!(a.k_synthetic, 1);
        assert_eq!(a.synthetic_groups, 2);
        assert_eq!(a.synthetic_unique_groups, 1);
    }

    #[test]
    fn absent_bucket_combinations_are_not_groups() {
        let records = vec![
            record(HomeType::Apt, 1, TariffType::Flat),
            record(HomeType::Apt, 2, TariffType::Flat),
        ];
        assert_eq!(k_anonymity(&records), 1);
        assert_eq!(k_anonymity_bucketed(&records), 2);
    }
}
