//! Property tests for the aggregation invariants.
//!
//! Rosters are generated with valid dates and times so every record takes
//! part in every aggregation.

use proptest::prelude::*;
use treatment_analytics::config::AnalyticsConfig;
use treatment_analytics::models::PatientRecord;
use treatment_analytics::services::{
    aggregate_by_patient, calculate_duration, classify_durations, monthly_counts,
    monthly_durations,
};
use treatment_analytics::time::MonthZone;

fn config() -> AnalyticsConfig {
    AnalyticsConfig::default().with_month_time_zone(MonthZone::Utc)
}

fn arb_record() -> impl Strategy<Value = PatientRecord> {
    (
        0usize..6,
        prop::sample::select(vec!["RPM", "CCM", ""]),
        1u32..=12,
        1u32..=28,
        0u32..24,
        0u32..60,
        0u32..24,
        0u32..60,
    )
        .prop_map(|(patient, feature, month, day, sh, sm, eh, em)| {
            PatientRecord::new(
                format!("Patient{}", patient),
                "Prop",
                format!("2024-{:02}-{:02}", month, day),
                format!("{:02}:{:02}", sh, sm),
                format!("{:02}:{:02}", eh, em),
            )
            .with_features(feature)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_bucket_counts_sum_to_len(records in prop::collection::vec(arb_record(), 0..60)) {
        let counts = classify_durations(&records, &config()).unwrap();
        prop_assert_eq!(counts.total(), records.len());
    }

    #[test]
    fn prop_monthly_counts_sum_to_len(records in prop::collection::vec(arb_record(), 0..60)) {
        let counts = monthly_counts(&records, &config()).unwrap();
        prop_assert_eq!(counts.iter().sum::<usize>(), records.len());
    }

    #[test]
    fn prop_monthly_durations_sum_to_total(records in prop::collection::vec(arb_record(), 0..60)) {
        let monthly: f64 = monthly_durations(&records, &config()).unwrap().iter().sum();
        let direct: f64 = records
            .iter()
            .map(|r| calculate_duration(&r.start_time, &r.end_time).unwrap())
            .sum();
        prop_assert!((monthly - direct).abs() < 1e-6);
    }

    #[test]
    fn prop_patient_total_is_sum_of_patients(records in prop::collection::vec(arb_record(), 0..60)) {
        let breakdown = aggregate_by_patient(&records, &config()).unwrap();
        let summed: f64 = breakdown.per_patient.iter().map(|p| p.duration).sum();
        prop_assert!((breakdown.total_duration - summed).abs() < 1e-6);

        for share in &breakdown.per_patient {
            let features: f64 = share.features.iter().map(|f| f.duration).sum();
            prop_assert!((share.duration - features).abs() < 1e-6);
        }
    }

    #[test]
    fn prop_duration_is_antisymmetric(sh in 0u32..24, sm in 0u32..60, eh in 0u32..24, em in 0u32..60) {
        let start = format!("{:02}:{:02}", sh, sm);
        let end = format!("{:02}:{:02}", eh, em);
        let forward = calculate_duration(&start, &end).unwrap();
        let backward = calculate_duration(&end, &start).unwrap();
        prop_assert_eq!(forward, -backward);
    }
}
