use log::warn;

use crate::config::ParsePolicy;
use crate::error::{AnalyticsResult, TimeField};
use crate::models::PatientRecord;
use crate::time::ClockTime;

/// Elapsed minutes between two visit times on the reference date.
///
/// The result is neither rounded nor clamped: sub-minute precision is kept
/// and an `end_time` before `start_time` gives a negative value.
///
/// # Examples
///
/// ```
/// use treatment_analytics::services::calculate_duration;
///
/// assert_eq!(calculate_duration("09:00", "09:30").unwrap(), 30.0);
/// assert_eq!(calculate_duration("09:00", "08:30").unwrap(), -30.0);
/// assert!(calculate_duration("9am", "09:30").is_err());
/// ```
pub fn calculate_duration(start_time: &str, end_time: &str) -> AnalyticsResult<f64> {
    let start = ClockTime::parse(start_time, TimeField::Start)?;
    let end = ClockTime::parse(end_time, TimeField::End)?;
    Ok(start.minutes_until(&end))
}

/// Like [`calculate_duration`], with any parse failure turned into `NaN`.
pub fn duration_or_nan(start_time: &str, end_time: &str) -> f64 {
    calculate_duration(start_time, end_time).unwrap_or(f64::NAN)
}

/// Duration of one record under `policy`.
pub fn record_duration(record: &PatientRecord, policy: ParsePolicy) -> AnalyticsResult<f64> {
    match calculate_duration(&record.start_time, &record.end_time) {
        Ok(minutes) => Ok(minutes),
        Err(err) => match policy {
            ParsePolicy::Strict => Err(err),
            ParsePolicy::Lenient => {
                warn!(
                    "Duration of visit for {} on {} is NaN: {}",
                    record.patient_key(),
                    record.treatment_date,
                    err
                );
                Ok(f64::NAN)
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;

    #[test]
    fn test_calculate_duration() {
        assert_eq!(calculate_duration("09:00", "09:30").unwrap(), 30.0);
        assert_eq!(calculate_duration("09:00", "09:00").unwrap(), 0.0);
        assert_eq!(calculate_duration("09:00:00", "09:10:30").unwrap(), 10.5);
        assert_eq!(calculate_duration("23:00", "24:00").unwrap(), 60.0);
    }

    #[test]
    fn test_negative_durations_are_kept() {
        assert_eq!(calculate_duration("09:00", "08:30").unwrap(), -30.0);
        assert_eq!(calculate_duration("23:50", "00:10").unwrap(), -1420.0);
    }

    #[test]
    fn test_parse_errors_name_the_field() {
        assert_eq!(
            calculate_duration("nine", "09:30").unwrap_err(),
            AnalyticsError::InvalidTime {
                field: TimeField::Start,
                value: "nine".to_string()
            }
        );
        assert_eq!(
            calculate_duration("09:00", "").unwrap_err(),
            AnalyticsError::InvalidTime {
                field: TimeField::End,
                value: String::new()
            }
        );
    }

    #[test]
    fn test_duration_or_nan() {
        assert_eq!(duration_or_nan("10:00", "10:15"), 15.0);
        assert!(duration_or_nan("10:00", "later").is_nan());
    }

    #[test]
    fn test_record_duration_policies() {
        let good = PatientRecord::new("A", "B", "2024-01-15", "10:00", "10:12");
        let bad = PatientRecord::new("A", "B", "2024-01-15", "10:00", "10h12");

        assert_eq!(record_duration(&good, ParsePolicy::Strict).unwrap(), 12.0);
        assert_eq!(record_duration(&good, ParsePolicy::Lenient).unwrap(), 12.0);
        assert!(record_duration(&bad, ParsePolicy::Strict).is_err());
        assert!(record_duration(&bad, ParsePolicy::Lenient).unwrap().is_nan());
    }
}
