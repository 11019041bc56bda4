//! Treatment-duration analytics for the patient scheduling dashboard.
//!
//! The crate turns a flat list of [`PatientRecord`]s into the statistics the
//! dashboard renders: visit counts per duration bucket, per-month counts and
//! minutes, per-patient and per-feature totals with their share of all
//! treatment time, and month/time-window filtered rosters.
//!
//! # Modules
//!
//! - [`services`]: duration calculator and the bucket, monthly and patient
//!   aggregators, plus [`compute_dashboard`] bundling all of them
//! - [`transformations`]: month and time-window filter, roster filter
//! - [`time`]: visit time parsing on a fixed reference date, treatment month
//! - [`parsing`]: JSON loader for exported records
//! - [`config`]: `analytics.toml` settings
//!
//! # Example
//!
//! ```
//! use treatment_analytics::{compute_dashboard, AnalyticsConfig, PatientRecord};
//!
//! let records = vec![
//!     PatientRecord::new("Ada", "Lovelace", "2024-03-04", "09:00", "09:25"),
//!     PatientRecord::new("Alan", "Turing", "2024-03-05", "14:00", "14:08"),
//! ];
//! let summary = compute_dashboard(&records, &AnalyticsConfig::default()).unwrap();
//!
//! assert_eq!(summary.bucket_counts.total(), 2);
//! assert_eq!(summary.patients.total_duration, 33.0);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod parsing;
pub mod services;
pub mod time;
pub mod transformations;

pub use config::{AnalyticsConfig, ParsePolicy};
pub use error::{AnalyticsError, AnalyticsResult, TimeField};
pub use models::{
    BucketCounts, DashboardSummary, DurationBucket, MonthSummary, PatientBreakdown, PatientKey,
    PatientRecord, PatientShare,
};
pub use services::{
    aggregate_by_patient, calculate_duration, classify_durations, compute_dashboard,
    monthly_counts, monthly_durations,
};
pub use transformations::{filter_by_month_and_window, RosterFilter};
