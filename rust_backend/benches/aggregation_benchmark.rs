use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use treatment_analytics::config::AnalyticsConfig;
use treatment_analytics::models::PatientRecord;
use treatment_analytics::services::{
    aggregate_by_patient, calculate_duration, classify_durations, compute_dashboard,
    monthly_durations,
};
use treatment_analytics::time::{ClockTime, MonthZone};
use treatment_analytics::transformations::filter_by_month_and_window;

fn synthetic_roster(size: usize) -> Vec<PatientRecord> {
    (0..size)
        .map(|i| {
            let month = i % 12 + 1;
            let start_minute = (i * 7) % 600;
            let length = (i * 13) % 45;
            let end_minute = start_minute + length;
            PatientRecord::new(
                format!("Patient{}", i % 250),
                "Bench",
                format!("2024-{:02}-{:02}", month, i % 28 + 1),
                format!("{:02}:{:02}", 8 + start_minute / 60, start_minute % 60),
                format!("{:02}:{:02}", 8 + end_minute / 60, end_minute % 60),
            )
            .with_features(if i % 3 == 0 { "RPM" } else { "CCM" })
            .with_provider(if i % 2 == 0 { "eCW" } else { "AMD" })
        })
        .collect()
}

fn bench_duration(c: &mut Criterion) {
    let mut group = c.benchmark_group("duration");

    group.bench_function("calculate_duration", |b| {
        b.iter(|| {
            for _ in 0..1000 {
                let _ = black_box(calculate_duration(black_box("09:15"), black_box("09:47:30")));
            }
        });
    });

    group.finish();
}

fn bench_aggregations(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregations");
    let config = AnalyticsConfig::default().with_month_time_zone(MonthZone::Utc);

    for size in [1_000usize, 10_000] {
        let records = synthetic_roster(size);

        group.bench_with_input(BenchmarkId::new("buckets", size), &records, |b, records| {
            b.iter(|| classify_durations(black_box(records), &config));
        });
        group.bench_with_input(BenchmarkId::new("monthly", size), &records, |b, records| {
            b.iter(|| monthly_durations(black_box(records), &config));
        });
        group.bench_with_input(BenchmarkId::new("patients", size), &records, |b, records| {
            b.iter(|| aggregate_by_patient(black_box(records), &config));
        });
        group.bench_with_input(BenchmarkId::new("dashboard", size), &records, |b, records| {
            b.iter(|| compute_dashboard(black_box(records), &config));
        });
    }

    group.finish();
}

fn bench_window_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtering");
    let config = AnalyticsConfig::default().with_month_time_zone(MonthZone::Utc);
    let records = synthetic_roster(10_000);
    let open = ClockTime::from_hm(9, 0).unwrap();
    let close = ClockTime::from_hm(17, 0).unwrap();

    group.bench_function("month_and_window", |b| {
        b.iter(|| filter_by_month_and_window(black_box(&records), 5, open, close, &config));
    });

    group.finish();
}

criterion_group!(benches, bench_duration, bench_aggregations, bench_window_filter);
criterion_main!(benches);
