//! Error types for treatment analytics.

use std::fmt;

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Which time string of a visit (or query window) failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
    WindowStart,
    WindowEnd,
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeField::Start => "startTime",
            TimeField::End => "endTime",
            TimeField::WindowStart => "window start",
            TimeField::WindowEnd => "window end",
        };
        f.write_str(name)
    }
}

/// Error type for analytics operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyticsError {
    /// A time-of-day string is not `HH:MM[:SS[.fff]]`.
    #[error("Invalid time for {field}: {value:?}")]
    InvalidTime { field: TimeField, value: String },

    /// A treatment date could not be read as a calendar date.
    #[error("Invalid treatment date: {value:?}")]
    InvalidDate { value: String },

    #[error("Month out of range: {0}")]
    InvalidMonth(u32),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AnalyticsError {
    pub(crate) fn invalid_time(field: TimeField, value: &str) -> Self {
        AnalyticsError::InvalidTime {
            field,
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_date(value: &str) -> Self {
        AnalyticsError::InvalidDate {
            value: value.to_string(),
        }
    }

    /// Whether this error comes from a malformed record rather than from
    /// the caller's query or configuration.
    pub fn is_record_error(&self) -> bool {
        match self {
            AnalyticsError::InvalidTime { field, .. } => {
                matches!(field, TimeField::Start | TimeField::End)
            }
            AnalyticsError::InvalidDate { .. } => true,
            _ => false,
        }
    }
}
