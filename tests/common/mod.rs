//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use tariff_lab::privacy::generator::REAL_RECORD_COUNT;
use tariff_lab::privacy::{SyntheticRecord, generate_real, resample_synthetic};
use tariff_lab::tariff::{HourlyReading, Market, generate_profile};

/// Seed used across fixtures.
pub const SEED: u64 = 42;

/// One generated household week for `market`.
pub fn week(market: Market, seed: u64) -> Vec<HourlyReading> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_profile(market, &mut rng).expect("profile should generate")
}

/// Real-like table and a synthetic table of `rows` drawn from the same generator.
pub fn tables(seed: u64, rows: usize) -> (Vec<SyntheticRecord>, Vec<SyntheticRecord>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let real = generate_real(REAL_RECORD_COUNT, &mut rng).expect("real table");
    let synthetic = resample_synthetic(&real, rows, &mut rng).expect("synthetic table");
    (real, synthetic)
}

/// Total of `values` with an absolute tolerance check helper.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
