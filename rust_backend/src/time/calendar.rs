use chrono::{
    DateTime, Datelike, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeDelta, TimeZone, Utc,
};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Zone in which the calendar month of a treatment date is read.
///
/// Durations never depend on this: they are always computed on the UTC
/// reference date. `Local` follows the host's time zone, so the same record
/// can land in different months on different machines near a month boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MonthZone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl MonthZone {
    /// Interpret a zone-less wall-clock date-time in this zone.
    fn localize(&self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            MonthZone::Local => resolve_wall_clock(naive, |wall| {
                Local
                    .from_local_datetime(wall)
                    .map(|dt| dt.with_timezone(&Utc))
            }),
            MonthZone::Utc => Some(naive.and_utc()),
            MonthZone::Fixed(offset) => resolve_wall_clock(naive, |wall| {
                offset
                    .from_local_datetime(wall)
                    .map(|dt| dt.with_timezone(&Utc))
            }),
        }
    }

    /// Zero-based calendar month of `instant` as seen from this zone.
    fn month0(&self, instant: &DateTime<Utc>) -> u32 {
        match self {
            MonthZone::Local => instant.with_timezone(&Local).month0(),
            MonthZone::Utc => instant.month0(),
            MonthZone::Fixed(offset) => instant.with_timezone(offset).month0(),
        }
    }
}

impl FromStr for MonthZone {
    type Err = AnalyticsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "local" => Ok(MonthZone::Local),
            "utc" | "z" => Ok(MonthZone::Utc),
            other => other.parse::<FixedOffset>().map(MonthZone::Fixed).map_err(|_| {
                AnalyticsError::ConfigurationError(format!(
                    "Unknown month_time_zone: {}. Use 'local', 'utc' or an offset like '+02:00'",
                    value
                ))
            }),
        }
    }
}

impl TryFrom<String> for MonthZone {
    type Error = AnalyticsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthZone> for String {
    fn from(zone: MonthZone) -> Self {
        zone.to_string()
    }
}

impl fmt::Display for MonthZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthZone::Local => f.write_str("local"),
            MonthZone::Utc => f.write_str("utc"),
            MonthZone::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

/// Zero-based calendar month (0 = January) of a treatment date.
///
/// Accepted forms:
/// - RFC 3339 (`2024-03-05T10:00:00.000Z`, `2024-03-05T10:00:00+02:00`): the
///   embedded offset fixes the instant.
/// - Date only (`2024-03-05`): midnight UTC.
/// - Zone-less date-time (`2024-03-05T10:00[:00[.fff]]`): wall clock in `zone`.
///
/// The month is then read in `zone`.
pub fn treatment_month(date: &str, zone: MonthZone) -> AnalyticsResult<u32> {
    parse_treatment_instant(date, zone)
        .map(|instant| zone.month0(&instant))
        .ok_or_else(|| AnalyticsError::invalid_date(date))
}

/// Resolve a wall-clock time through `lookup`.
///
/// A repeated time (clocks set back) takes its first occurrence. A time
/// skipped by a forward transition is read one hour later, so
/// `02:30` in a `02:00`-`03:00` gap becomes the instant of `03:30`.
fn resolve_wall_clock<F>(naive: &NaiveDateTime, lookup: F) -> Option<DateTime<Utc>>
where
    F: Fn(&NaiveDateTime) -> LocalResult<DateTime<Utc>>,
{
    lookup(naive).earliest().or_else(|| {
        let shifted = naive.checked_add_signed(TimeDelta::try_hours(1)?)?;
        lookup(&shifted).earliest()
    })
}

fn parse_treatment_instant(date: &str, zone: MonthZone) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        return Some(day.and_time(NaiveTime::MIN).and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(date, format).ok())
        .and_then(|naive| zone.localize(&naive))
}
