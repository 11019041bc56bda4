use log::debug;

use crate::config::AnalyticsConfig;
use crate::error::AnalyticsResult;
use crate::models::{BucketCounts, BucketShares, DurationBucket, PatientRecord};

use super::duration::record_duration;
use super::formatting::to_fixed_2;

/// Bucket for a duration in minutes.
///
/// Upper bounds are inclusive: 10 is `0-10 min`, 20 is `10-20 min`.
/// Negative durations fall in `0-10 min`. `NaN` compares false against both
/// bounds and so falls in `20+ min`.
pub fn classify_minutes(minutes: f64) -> DurationBucket {
    if minutes <= 10.0 {
        DurationBucket::UpToTen
    } else if minutes <= 20.0 {
        DurationBucket::TenToTwenty
    } else {
        DurationBucket::OverTwenty
    }
}

/// Count visits per duration bucket. The counts always sum to `records.len()`.
pub fn classify_durations(
    records: &[PatientRecord],
    config: &AnalyticsConfig,
) -> AnalyticsResult<BucketCounts> {
    let mut counts = BucketCounts::default();

    for record in records {
        let minutes = record_duration(record, config.parse_policy)?;
        counts.increment(classify_minutes(minutes));
    }

    if log::log_enabled!(log::Level::Debug) {
        let per_bucket: Vec<String> = DurationBucket::ALL
            .iter()
            .map(|&bucket| format!("{}: {}", bucket.label(), counts.get(bucket)))
            .collect();
        debug!("Classified {} visits ({})", records.len(), per_bucket.join(", "));
    }

    Ok(counts)
}

/// Percentage of visits in each bucket. An empty roster gives `"NaN"`.
pub fn bucket_shares(counts: &BucketCounts) -> BucketShares {
    let total = counts.total() as f64;
    let share = |bucket: DurationBucket| to_fixed_2(counts.get(bucket) as f64 / total * 100.0);

    BucketShares {
        up_to_ten: share(DurationBucket::UpToTen),
        ten_to_twenty: share(DurationBucket::TenToTwenty),
        over_twenty: share(DurationBucket::OverTwenty),
    }
}

/// Income from visits that reached the 20 minute goal.
pub fn goal_income(counts: &BucketCounts, goal_rate: f64) -> f64 {
    counts.over_twenty as f64 * goal_rate
}
