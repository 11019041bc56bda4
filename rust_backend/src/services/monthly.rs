//! Per-month treatment counts and durations.
//!
//! Every series has exactly twelve slots, index 0 being January. The month
//! of a record is read from its `treatmentDate` in the configured
//! [`MonthZone`](crate::time::MonthZone).

use log::{debug, warn};

use crate::config::{AnalyticsConfig, ParsePolicy};
use crate::error::AnalyticsResult;
use crate::models::{MonthSummary, PatientDuration, PatientRecord};
use crate::time::treatment_month;

use super::duration::record_duration;
use super::formatting::to_fixed_2;
use super::patients::aggregate_by_patient;

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Zero-based month of a record.
///
/// Under the lenient policy an unreadable date gives `Ok(None)`: the record
/// belongs to no month.
pub fn record_month(
    record: &PatientRecord,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Option<usize>> {
    match treatment_month(&record.treatment_date, config.month_time_zone) {
        Ok(month) => Ok(Some(month as usize)),
        Err(err) => match config.parse_policy {
            ParsePolicy::Strict => Err(err),
            ParsePolicy::Lenient => {
                warn!("Visit for {} has no month: {}", record.patient_key(), err);
                Ok(None)
            }
        },
    }
}

/// Number of visits per calendar month.
pub fn monthly_counts(
    records: &[PatientRecord],
    config: &AnalyticsConfig,
) -> AnalyticsResult<[usize; 12]> {
    let mut counts = [0usize; 12];
    for record in records {
        if let Some(month) = record_month(record, config)? {
            counts[month] += 1;
        }
    }
    Ok(counts)
}

/// Summed visit minutes per calendar month.
pub fn monthly_durations(
    records: &[PatientRecord],
    config: &AnalyticsConfig,
) -> AnalyticsResult<[f64; 12]> {
    let mut durations = [0.0f64; 12];
    for record in records {
        let month = record_month(record, config)?;
        let minutes = record_duration(record, config.parse_policy)?;
        if let Some(month) = month {
            durations[month] += minutes;
        }
    }
    Ok(durations)
}

/// One card per month, January first.
///
/// `share_of_total` is the month's minutes over the roster's total
/// treatment time as [`aggregate_by_patient`] reports it. A month without
/// visits reports `"NaN"` as its average.
pub fn monthly_breakdown(
    records: &[PatientRecord],
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<MonthSummary>> {
    let total_duration = aggregate_by_patient(records, config)?.total_duration;
    monthly_breakdown_with_total(records, total_duration, config)
}

/// [`monthly_breakdown`] against an already computed `total_duration`.
///
/// Under the lenient policy the total may include visits that belong to no
/// month, so it is not the sum of the twelve cards.
pub fn monthly_breakdown_with_total(
    records: &[PatientRecord],
    total_duration: f64,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<MonthSummary>> {
    let mut durations = [0.0f64; 12];
    let mut visits: [Vec<PatientDuration>; 12] = Default::default();

    for record in records {
        let month = record_month(record, config)?;
        let minutes = record_duration(record, config.parse_policy)?;
        if let Some(month) = month {
            durations[month] += minutes;
            visits[month].push(PatientDuration {
                patient: record.patient_key(),
                duration: minutes,
            });
        }
    }

    debug!("Monthly breakdown over {} minutes", total_duration);

    Ok(durations
        .iter()
        .zip(visits)
        .enumerate()
        .map(|(month, (&duration, patients))| MonthSummary {
            month,
            label: MONTH_LABELS[month].to_string(),
            name: MONTH_NAMES[month].to_string(),
            total_duration: duration,
            share_of_total: to_fixed_2(duration / total_duration * 100.0),
            treatments: patients.len(),
            average_duration: to_fixed_2(duration / patients.len() as f64),
            patients,
        })
        .collect())
}

/// Index of the month with the most visits. Ties go to the earliest month;
/// a series of zeros has no busiest month.
pub fn busiest_month(counts: &[usize; 12]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (month, &count) in counts.iter().enumerate() {
        if count == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= count => {}
            _ => best = Some((month, count)),
        }
    }
    best.map(|(month, _)| month)
}

/// Mean minutes per visit rounded to the nearest whole minute, halves up.
pub fn average_duration(total_duration: f64, visits: usize) -> f64 {
    (total_duration / visits as f64 + 0.5).floor()
}
