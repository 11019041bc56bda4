//! Record selection for the roster and time-window views.
//!
//! - [`filtering`]: month and time-of-day window filter, roster filter,
//!   provider count
//!
//! # Example
//!
//! ```
//! use treatment_analytics::config::AnalyticsConfig;
//! use treatment_analytics::models::PatientRecord;
//! use treatment_analytics::time::{ClockTime, MonthZone};
//! use treatment_analytics::transformations::filter_by_month_and_window;
//!
//! let records = vec![PatientRecord::new("Ada", "Lovelace", "2024-01-10", "09:30", "09:50")];
//! let config = AnalyticsConfig::default().with_month_time_zone(MonthZone::Utc);
//! let open = ClockTime::from_hm(9, 0).unwrap();
//! let close = ClockTime::from_hm(17, 0).unwrap();
//!
//! let kept = filter_by_month_and_window(&records, 0, open, close, &config).unwrap();
//! assert_eq!(kept.len(), 1);
//! ```

pub mod filtering;

pub use filtering::{distinct_providers, filter_by_month_and_window, RosterFilter};
