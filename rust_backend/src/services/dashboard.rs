use log::info;

use crate::config::AnalyticsConfig;
use crate::error::AnalyticsResult;
use crate::models::{DashboardSummary, PatientRecord};
use crate::transformations::distinct_providers;

use super::buckets::{bucket_shares, classify_durations, goal_income};
use super::monthly::{
    average_duration, busiest_month, monthly_breakdown_with_total, monthly_counts,
    monthly_durations,
};
use super::patients::aggregate_by_patient;

/// Compute every figure the dashboard shows for one roster.
///
/// Each aggregation is recomputed from `records`; nothing is cached between
/// calls. Under the strict policy the first malformed record fails the whole
/// summary.
pub fn compute_dashboard(
    records: &[PatientRecord],
    config: &AnalyticsConfig,
) -> AnalyticsResult<DashboardSummary> {
    info!("Computing dashboard for {} visits", records.len());

    // Duration buckets
    let bucket_counts = classify_durations(records, config)?;
    let shares = bucket_shares(&bucket_counts);
    let income = goal_income(&bucket_counts, config.goal_rate);

    // Patients
    let patients = aggregate_by_patient(records, config)?;
    let average = average_duration(patients.total_duration, records.len());

    // Month series and cards
    let counts = monthly_counts(records, config)?;
    let durations = monthly_durations(records, config)?;
    let breakdown = monthly_breakdown_with_total(records, patients.total_duration, config)?;
    let busiest = busiest_month(&counts);

    let summary = DashboardSummary {
        total_records: records.len(),
        bucket_counts,
        bucket_shares: shares,
        goal_income: income,
        monthly_counts: counts,
        monthly_durations: durations,
        monthly_breakdown: breakdown,
        busiest_month: busiest,
        patients,
        average_duration: average,
        distinct_providers: distinct_providers(records),
    };

    info!(
        "Dashboard ready: {} patients, {} minutes, busiest month {:?}",
        summary.patients.len(),
        summary.patients.total_duration,
        summary.busiest_month
    );

    Ok(summary)
}
