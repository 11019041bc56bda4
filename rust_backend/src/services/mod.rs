//! Aggregation services behind the dashboard.
//!
//! Every function here is a pure computation over a borrowed slice of
//! [`PatientRecord`](crate::models::PatientRecord)s: the input is never
//! mutated and each call rebuilds its output from the full slice.

pub mod buckets;
pub mod dashboard;
pub mod duration;
pub mod formatting;
pub mod monthly;
pub mod patients;

pub use buckets::{bucket_shares, classify_durations, classify_minutes, goal_income};
pub use dashboard::compute_dashboard;
pub use duration::{calculate_duration, duration_or_nan, record_duration};
pub use monthly::{
    average_duration, busiest_month, monthly_breakdown, monthly_breakdown_with_total,
    monthly_counts, monthly_durations, record_month, MONTH_LABELS, MONTH_NAMES,
};
pub use patients::aggregate_by_patient;
