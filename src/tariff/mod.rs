//! Consumption & tariff simulator.
//!
//! Pipeline: [`profile::generate_profile`] → [`schedule::TariffSchedule::for_market`]
//! → [`billing::bill`] / [`shifting::shift_load`] → [`summary`].

pub mod billing;
/// Market variants and their parameter defaults.
pub mod market;
pub mod profile;
pub mod schedule;
pub mod shifting;
pub mod summary;

pub use billing::bill;
pub use market::{Market, PricingScheme};
pub use profile::{HourlyReading, generate_profile};
pub use schedule::TariffSchedule;
pub use shifting::{DayShift, ShiftOutcome, ShiftParams, ShiftedReading, shift_load};
pub use summary::{BillComparison, SavingsSummary};
