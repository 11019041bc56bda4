//! Time handling for visit records.
//!
//! Visit times are bare wall-clock strings. They are anchored to a fixed
//! reference date in UTC ([`clock`]) so only the time of day affects a
//! duration. Treatment dates are full calendar dates whose month is read in
//! a configurable zone ([`calendar`]).

pub mod calendar;
pub mod clock;

pub use calendar::{treatment_month, MonthZone};
pub use clock::ClockTime;
