use std::collections::HashMap;

use log::debug;

use crate::config::AnalyticsConfig;
use crate::error::AnalyticsResult;
use crate::models::{FeatureDuration, PatientBreakdown, PatientKey, PatientRecord, PatientShare};

use super::duration::record_duration;
use super::formatting::to_fixed_2;

/// Per-feature minutes of one patient while the roster is being scanned.
#[derive(Debug, Default)]
struct FeatureTotals {
    features: Vec<FeatureDuration>,
    index: HashMap<String, usize>,
}

impl FeatureTotals {
    /// Add `minutes` to `feature`. A running sum that became `NaN` restarts
    /// from zero on the next visit.
    fn add(&mut self, feature: &str, minutes: f64) {
        match self.index.get(feature) {
            Some(&slot) => {
                let entry = &mut self.features[slot];
                let base = if entry.duration.is_nan() {
                    0.0
                } else {
                    entry.duration
                };
                entry.duration = base + minutes;
            }
            None => {
                self.index.insert(feature.to_string(), self.features.len());
                self.features.push(FeatureDuration {
                    feature: feature.to_string(),
                    duration: minutes,
                });
            }
        }
    }

    fn total(&self) -> f64 {
        self.features.iter().map(|f| f.duration).sum()
    }
}

/// Total treatment minutes per patient and per feature, with each patient's
/// share of the overall time.
///
/// Patients are keyed by `"{first_name} {last_name}"` and listed in order of
/// first appearance. The share is `duration / total * share_multiplier`
/// formatted to two decimals; with the default multiplier of 500 a single
/// patient reports `"500.00"`.
pub fn aggregate_by_patient(
    records: &[PatientRecord],
    config: &AnalyticsConfig,
) -> AnalyticsResult<PatientBreakdown> {
    let mut order: Vec<(PatientKey, FeatureTotals)> = Vec::new();
    let mut index: HashMap<PatientKey, usize> = HashMap::new();

    for record in records {
        let minutes = record_duration(record, config.parse_policy)?;
        let key = record.patient_key();

        let slot = match index.get(&key) {
            Some(&slot) => slot,
            None => {
                index.insert(key.clone(), order.len());
                order.push((key, FeatureTotals::default()));
                order.len() - 1
            }
        };
        order[slot].1.add(&record.features, minutes);
    }

    let sums: Vec<f64> = order.iter().map(|(_, totals)| totals.total()).collect();
    let total_duration: f64 = sums.iter().sum();

    debug!(
        "Aggregated {} visits into {} patients ({} minutes)",
        records.len(),
        order.len(),
        total_duration
    );

    let per_patient = order
        .into_iter()
        .zip(sums)
        .map(|((patient, totals), duration)| PatientShare {
            patient,
            duration,
            percentage: to_fixed_2(duration / total_duration * config.share_multiplier),
            features: totals.features,
        })
        .collect();

    Ok(PatientBreakdown {
        per_patient,
        total_duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsePolicy;

    fn visit(first: &str, last: &str, start: &str, end: &str, feature: &str) -> PatientRecord {
        PatientRecord::new(first, last, "2024-01-15", start, end).with_features(feature)
    }

    #[test]
    fn test_single_patient_reports_full_multiplier() {
        let records = vec![
            visit("Ada", "Lovelace", "09:00", "09:10", "RPM"),
            visit("Ada", "Lovelace", "10:00", "10:20", "RPM"),
        ];
        let breakdown = aggregate_by_patient(&records, &AnalyticsConfig::default()).unwrap();

        assert_eq!(breakdown.total_duration, 30.0);
        assert_eq!(breakdown.len(), 1);
        let ada = breakdown.get("Ada Lovelace").unwrap();
        assert_eq!(ada.duration, 30.0);
        assert_eq!(ada.percentage, "500.00");
        assert_eq!(ada.features.len(), 1);
        assert_eq!(ada.features[0].duration, 30.0);
    }

    #[test]
    fn test_features_and_first_seen_order() {
        let records = vec![
            visit("Grace", "Hopper", "09:00", "09:30", "CCM"),
            visit("Alan", "Turing", "09:00", "09:10", "RPM"),
            visit("Grace", "Hopper", "11:00", "11:10", "RPM"),
            visit("Grace", "Hopper", "12:00", "12:20", "CCM"),
        ];
        let config = AnalyticsConfig::default().with_share_multiplier(100.0);
        let breakdown = aggregate_by_patient(&records, &config).unwrap();

        let names: Vec<&str> = breakdown
            .per_patient
            .iter()
            .map(|p| p.patient.as_str())
            .collect();
        assert_eq!(names, vec!["Grace Hopper", "Alan Turing"]);

        let grace = &breakdown.per_patient[0];
        assert_eq!(grace.duration, 60.0);
        assert_eq!(grace.features[0].feature, "CCM");
        assert_eq!(grace.features[0].duration, 50.0);
        assert_eq!(grace.features[1].feature, "RPM");
        assert_eq!(grace.features[1].duration, 10.0);

        assert_eq!(breakdown.total_duration, 70.0);
        assert_eq!(grace.percentage, "85.71");
        assert_eq!(breakdown.per_patient[1].percentage, "14.29");
    }

    #[test]
    fn test_total_is_sum_of_patients() {
        let records = vec![
            visit("A", "One", "09:00", "09:07", ""),
            visit("B", "Two", "09:00", "09:13", ""),
            visit("A", "One", "09:00", "08:55", ""),
        ];
        let breakdown = aggregate_by_patient(&records, &AnalyticsConfig::default()).unwrap();
        let summed: f64 = breakdown.per_patient.iter().map(|p| p.duration).sum();
        assert_eq!(breakdown.total_duration, summed);
        assert_eq!(breakdown.get("A One").unwrap().duration, 2.0);
    }

    #[test]
    fn test_empty_roster() {
        let breakdown = aggregate_by_patient(&[], &AnalyticsConfig::default()).unwrap();
        assert_eq!(breakdown.total_duration, 0.0);
        assert!(breakdown.is_empty());
    }

    #[test]
    fn test_zero_total_percentage() {
        let records = vec![visit("Zero", "Minutes", "09:00", "09:00", "")];
        let breakdown = aggregate_by_patient(&records, &AnalyticsConfig::default()).unwrap();
        assert_eq!(breakdown.per_patient[0].percentage, "NaN");
    }

    #[test]
    fn test_lenient_nan_resets_feature_sum() {
        let records = vec![
            visit("Ada", "Lovelace", "09:00", "broken", "RPM"),
            visit("Ada", "Lovelace", "10:00", "10:20", "RPM"),
        ];

        assert!(aggregate_by_patient(&records, &AnalyticsConfig::default()).is_err());

        let lenient = AnalyticsConfig::default().with_parse_policy(ParsePolicy::Lenient);
        let breakdown = aggregate_by_patient(&records, &lenient).unwrap();
        assert_eq!(breakdown.get("Ada Lovelace").unwrap().duration, 20.0);
        assert_eq!(breakdown.total_duration, 20.0);
    }
}
