use chrono::{DateTime, NaiveTime, TimeDelta, Utc};
use std::fmt;

use crate::error::{AnalyticsError, AnalyticsResult, TimeField};

/// A visit time anchored to the reference date (1970-01-01, UTC).
///
/// Only the time of day carries information. `24:00` is accepted and
/// denotes the end of the reference day.
///
/// # Examples
///
/// ```
/// use treatment_analytics::error::TimeField;
/// use treatment_analytics::time::ClockTime;
///
/// let start = ClockTime::parse("09:00", TimeField::Start).unwrap();
/// let end = ClockTime::parse("09:30:30", TimeField::End).unwrap();
/// assert_eq!(start.minutes_until(&end), 30.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(DateTime<Utc>);

impl ClockTime {
    /// Parse `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`.
    pub fn parse(value: &str, field: TimeField) -> AnalyticsResult<Self> {
        parse_time_of_day(value)
            .map(|offset| ClockTime(DateTime::UNIX_EPOCH + offset))
            .ok_or_else(|| AnalyticsError::invalid_time(field, value))
    }

    /// Build a time from hour and minute. Returns `None` outside `00:00`-`23:59`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(|time| ClockTime(DateTime::UNIX_EPOCH + time.signed_duration_since(NaiveTime::MIN)))
    }

    /// Milliseconds since midnight of the reference date.
    pub fn millis_since_midnight(&self) -> i64 {
        (self.0 - DateTime::UNIX_EPOCH).num_milliseconds()
    }

    /// Elapsed minutes from `self` to `later`. Negative when `later` is earlier;
    /// there is no wraparound past midnight.
    pub fn minutes_until(&self, later: &ClockTime) -> f64 {
        (later.0 - self.0).num_milliseconds() as f64 / 60_000.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.millis_since_midnight() == 24 * 3_600_000 {
            return f.write_str("24:00:00");
        }
        write!(f, "{}", self.0.format("%H:%M:%S%.3f"))
    }
}

fn parse_time_of_day(value: &str) -> Option<TimeDelta> {
    if is_end_of_day(value) {
        return TimeDelta::try_hours(24);
    }
    if !has_clock_shape(value) {
        return None;
    }

    let format = if value.len() == 5 { "%H:%M" } else { "%H:%M:%S%.f" };
    NaiveTime::parse_from_str(value, format)
        .ok()
        .map(|time| time.signed_duration_since(NaiveTime::MIN))
}

/// `24:00`, `24:00:00` and `24:00:00.000` (all-zero fraction).
fn is_end_of_day(value: &str) -> bool {
    match value.strip_prefix("24:00") {
        Some("") | Some(":00") => true,
        Some(rest) => rest
            .strip_prefix(":00.")
            .map(|fraction| !fraction.is_empty() && fraction.bytes().all(|b| b == b'0'))
            .unwrap_or(false),
        None => false,
    }
}

/// Two-digit fields only; seconds below 60 and at most nine fractional digits.
fn has_clock_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    let two_digits =
        |i: usize| bytes.len() >= i + 2 && bytes[i].is_ascii_digit() && bytes[i + 1].is_ascii_digit();

    if !(two_digits(0) && bytes.get(2) == Some(&b':') && two_digits(3)) {
        return false;
    }

    let seconds_ok = || bytes[5] == b':' && two_digits(6) && bytes[6] < b'6';
    match bytes.len() {
        5 => true,
        8 => seconds_ok(),
        10..=18 => seconds_ok() && bytes[8] == b'.' && bytes[9..].iter().all(u8::is_ascii_digit),
        _ => false,
    }
}
