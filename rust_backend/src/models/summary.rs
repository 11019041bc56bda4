//! Aggregate views consumed by the dashboard charts and cards.
//!
//! Durations are minutes as `f64` and may be `NaN` under the lenient parse
//! policy (serialized as JSON `null`). Percentages are strings with exactly
//! two fractional digits, or `"NaN"`/`"Infinity"` for degenerate totals.

use serde::{Deserialize, Serialize};

use super::PatientKey;

/// The three fixed duration ranges a visit is classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "0-10 min")]
    UpToTen,
    #[serde(rename = "10-20 min")]
    TenToTwenty,
    #[serde(rename = "20+ min")]
    OverTwenty,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 3] = [
        DurationBucket::UpToTen,
        DurationBucket::TenToTwenty,
        DurationBucket::OverTwenty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DurationBucket::UpToTen => "0-10 min",
            DurationBucket::TenToTwenty => "10-20 min",
            DurationBucket::OverTwenty => "20+ min",
        }
    }
}

/// Number of visits per duration bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    #[serde(rename = "0-10 min")]
    pub up_to_ten: usize,
    #[serde(rename = "10-20 min")]
    pub ten_to_twenty: usize,
    #[serde(rename = "20+ min")]
    pub over_twenty: usize,
}

impl BucketCounts {
    pub fn get(&self, bucket: DurationBucket) -> usize {
        match bucket {
            DurationBucket::UpToTen => self.up_to_ten,
            DurationBucket::TenToTwenty => self.ten_to_twenty,
            DurationBucket::OverTwenty => self.over_twenty,
        }
    }

    pub fn increment(&mut self, bucket: DurationBucket) {
        match bucket {
            DurationBucket::UpToTen => self.up_to_ten += 1,
            DurationBucket::TenToTwenty => self.ten_to_twenty += 1,
            DurationBucket::OverTwenty => self.over_twenty += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.up_to_ten + self.ten_to_twenty + self.over_twenty
    }
}

/// Share of visits per bucket, `count / total * 100`, two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketShares {
    #[serde(rename = "0-10 min")]
    pub up_to_ten: String,
    #[serde(rename = "10-20 min")]
    pub ten_to_twenty: String,
    #[serde(rename = "20+ min")]
    pub over_twenty: String,
}

/// Summed duration of one patient's visits carrying the same feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDuration {
    pub feature: String,
    pub duration: f64,
}

/// One patient's total treatment time and share of the overall time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientShare {
    pub patient: PatientKey,
    pub duration: f64,
    pub percentage: String,
    /// Per-feature sums, in order of first appearance.
    pub features: Vec<FeatureDuration>,
}

/// Per-patient totals, in order of each patient's first appearance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientBreakdown {
    pub per_patient: Vec<PatientShare>,
    pub total_duration: f64,
}

impl PatientBreakdown {
    pub fn get(&self, patient: &str) -> Option<&PatientShare> {
        self.per_patient
            .iter()
            .find(|share| share.patient.as_str() == patient)
    }

    pub fn len(&self) -> usize {
        self.per_patient.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_patient.is_empty()
    }
}

/// A single visit's duration, as listed on a month card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientDuration {
    pub patient: PatientKey,
    pub duration: f64,
}

/// Everything one month card shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    /// Zero-based month index.
    pub month: usize,
    /// Short label, `Jan`..`Dec`.
    pub label: String,
    /// Full month name for the card title.
    pub name: String,
    pub total_duration: f64,
    /// Month duration as a percentage of all treatment time.
    pub share_of_total: String,
    pub treatments: usize,
    pub average_duration: String,
    pub patients: Vec<PatientDuration>,
}

/// Complete dashboard payload for one roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_records: usize,
    pub bucket_counts: BucketCounts,
    pub bucket_shares: BucketShares,
    pub goal_income: f64,
    pub monthly_counts: [usize; 12],
    pub monthly_durations: [f64; 12],
    pub monthly_breakdown: Vec<MonthSummary>,
    pub busiest_month: Option<usize>,
    pub patients: PatientBreakdown,
    /// Mean minutes per visit rounded to the nearest integer.
    pub average_duration: f64,
    pub distinct_providers: usize,
}
