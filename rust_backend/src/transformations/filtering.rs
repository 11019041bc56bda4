use std::collections::HashSet;

use log::{debug, warn};

use crate::config::{AnalyticsConfig, ParsePolicy};
use crate::error::{AnalyticsError, AnalyticsResult, TimeField};
use crate::models::PatientRecord;
use crate::services::record_month;
use crate::time::ClockTime;

/// Start and end of a visit, or `None` when the lenient policy skips an
/// unreadable time.
fn visit_times(
    record: &PatientRecord,
    policy: ParsePolicy,
) -> AnalyticsResult<Option<(ClockTime, ClockTime)>> {
    let parsed = ClockTime::parse(&record.start_time, TimeField::Start).and_then(|start| {
        ClockTime::parse(&record.end_time, TimeField::End).map(|end| (start, end))
    });

    match (parsed, policy) {
        (Ok(times), _) => Ok(Some(times)),
        (Err(err), ParsePolicy::Strict) => Err(err),
        (Err(err), ParsePolicy::Lenient) => {
            warn!("Skipping visit for {}: {}", record.patient_key(), err);
            Ok(None)
        }
    }
}

/// Filter visits by zero-based month and time-of-day window.
///
/// A visit is kept when its treatment month equals `month`, it starts at or
/// after `window_start`, and it ends at or before `window_end`. Both bounds
/// are inclusive. Kept records are cloned in input order.
///
/// # Errors
/// * `AnalyticsError::InvalidMonth` if `month` is not in `0..=11`
/// * a time or date error for the first malformed record under the strict
///   policy; the lenient policy drops such records instead
pub fn filter_by_month_and_window(
    records: &[PatientRecord],
    month: u32,
    window_start: ClockTime,
    window_end: ClockTime,
    config: &AnalyticsConfig,
) -> AnalyticsResult<Vec<PatientRecord>> {
    if month > 11 {
        return Err(AnalyticsError::InvalidMonth(month));
    }

    let mut filtered = Vec::new();
    for record in records {
        let visit_month = record_month(record, config)?;
        let times = visit_times(record, config.parse_policy)?;

        let in_month = visit_month == Some(month as usize);
        let in_window = times
            .map(|(start, end)| start >= window_start && end <= window_end)
            .unwrap_or(false);

        if in_month && in_window {
            filtered.push(record.clone());
        }
    }

    debug!(
        "Window {} - {} in month {} kept {} of {} visits",
        window_start,
        window_end,
        month,
        filtered.len(),
        records.len()
    );

    Ok(filtered)
}

/// Roster view state: month selector, name search and the gender and
/// provider drop-downs.
///
/// `month` is one-based (1 = January) with `None` meaning every month.
/// Empty `gender` or `provider` disable that filter; an empty `search`
/// matches every name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterFilter {
    pub month: Option<u32>,
    pub search: String,
    pub gender: String,
    pub provider: String,
}

impl RosterFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    /// Whether one record passes every active filter.
    pub fn matches(
        &self,
        record: &PatientRecord,
        config: &AnalyticsConfig,
    ) -> AnalyticsResult<bool> {
        if let Some(month) = self.month {
            if !(1..=12).contains(&month) {
                return Err(AnalyticsError::InvalidMonth(month));
            }
            if record_month(record, config)? != Some(month as usize - 1) {
                return Ok(false);
            }
        }

        let name = record.patient_key().as_str().to_lowercase();
        if !name.contains(&self.search.to_lowercase()) {
            return Ok(false);
        }

        if !self.gender.is_empty() && record.patient_gender != self.gender {
            return Ok(false);
        }

        if !self.provider.is_empty() && !record.providers.contains(&self.provider) {
            return Ok(false);
        }

        Ok(true)
    }

    /// Records passing the filter, cloned in input order.
    pub fn apply(
        &self,
        records: &[PatientRecord],
        config: &AnalyticsConfig,
    ) -> AnalyticsResult<Vec<PatientRecord>> {
        let mut filtered = Vec::new();
        for record in records {
            if self.matches(record, config)? {
                filtered.push(record.clone());
            }
        }
        Ok(filtered)
    }
}

/// Number of distinct `providers` strings, the empty string included.
pub fn distinct_providers(records: &[PatientRecord]) -> usize {
    records
        .iter()
        .map(|r| r.providers.as_str())
        .collect::<HashSet<_>>()
        .len()
}
