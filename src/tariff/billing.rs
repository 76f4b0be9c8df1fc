use super::profile::HourlyReading;
use super::schedule::TariffSchedule;

/// Total cost of `readings` under `schedule`: Σ consumption × rate(hour).
///
/// # Examples
///
/// ```
/// use tariff_lab::tariff::{TariffSchedule, bill, profile::constant_profile};
///
/// let week = constant_profile(1.0);
/// let cost = bill(&week, &TariffSchedule::flat(0.12));
/// assert!((cost - 20.16).abs() < 1e-9);
/// ```
pub fn bill(readings: &[HourlyReading], schedule: &TariffSchedule) -> f64 {
    readings
        .iter()
        .map(|r| r.consumption_kwh * schedule.rate_at(r.hour))
        .sum()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::tariff::market::{Market, PricingScheme};
    use crate::tariff::profile::{constant_profile, generate_profile};

    #[test]
    fn flat_week_of_unit_readings() {
        let cost = bill(&constant_profile(1.0), &TariffSchedule::flat(0.12));
        assert!((cost - 20.16).abs() < 1e-9, "got {cost}");
    }

    #[test]
    fn empty_readings_cost_nothing() {
        assert_eq!(bill(&[], &TariffSchedule::flat(0.12)), 0.0);
    }

    #[test]
    fn bill_matches_explicit_sum() {
        let mut rng = StdRng::seed_from_u64(42);
        let week = generate_profile(Market::Generic, &mut rng).expect("profile");
        let schedule = TariffSchedule::for_market(Market::Generic, PricingScheme::TimeOfUse);

        let mut expected = 0.0;
        for r in &week {
            expected += r.consumption_kwh * schedule.rates()[r.hour];
        }
        assert!((bill(&week, &schedule) - expected).abs() < 1e-9);
    }

    #[test]
    fn bill_scales_linearly_with_rates() {
        let mut rng = StdRng::seed_from_u64(3);
        let week = generate_profile(Market::Maharashtra, &mut rng).expect("profile");
        let schedule = TariffSchedule::for_market(Market::Maharashtra, PricingScheme::CriticalPeak);

        let base = bill(&week, &schedule);
        for c in [0.5, 2.0, 3.7] {
            let scaled = bill(&week, &schedule.scaled(c));
            assert!((scaled - c * base).abs() < 1e-6 * base.max(1.0));
        }
    }
}
