use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping identity of a patient: first and last name joined by a space.
///
/// This is not a unique identifier. Two different patients with the same
/// first and last name share a key and are aggregated together.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientKey(String);

impl PatientKey {
    pub fn from_names(first_name: &str, last_name: &str) -> Self {
        PatientKey(format!("{} {}", first_name, last_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PatientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&PatientRecord> for PatientKey {
    fn from(record: &PatientRecord) -> Self {
        PatientKey::from_names(&record.first_name, &record.last_name)
    }
}

/// One treatment visit as exported by the scheduling backend.
///
/// Field names follow the backend's camelCase JSON. Only `firstName`,
/// `lastName`, `treatmentDate`, `startTime` and `endTime` are required;
/// everything else defaults when absent. Derived values such as the visit
/// duration are never stored here, they are recomputed on every use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub patient_gender: String,
    #[serde(rename = "patientDOB", default, skip_serializing_if = "Option::is_none")]
    pub patient_dob: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_zip_code: Option<String>,
    /// Free-text provider name (`eCW`, `AMD`, `Quest`, ...).
    #[serde(default)]
    pub providers: String,
    #[serde(rename = "providerURL", default, skip_serializing_if = "Option::is_none")]
    pub provider_url: Option<String>,
    pub treatment_date: String,
    /// `HH:MM[:SS]` on the reference date.
    pub start_time: String,
    /// `HH:MM[:SS]` on the reference date. Expected after `start_time`.
    pub end_time: String,
    /// Secondary grouping key for a patient's treatment time.
    #[serde(default)]
    pub features: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl PatientRecord {
    /// Minimal record with the fields the aggregations read.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        treatment_date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            treatment_date: treatment_date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Default::default()
        }
    }

    pub fn with_features(mut self, features: impl Into<String>) -> Self {
        self.features = features.into();
        self
    }

    pub fn with_provider(mut self, providers: impl Into<String>) -> Self {
        self.providers = providers.into();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.patient_gender = gender.into();
        self
    }

    pub fn patient_key(&self) -> PatientKey {
        PatientKey::from(self)
    }
}
