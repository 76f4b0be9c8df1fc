//! File output for chart-ready series.

pub mod export;

pub use export::{export_carbon, export_privacy, export_tariff};
