use chrono::{Duration, TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use sensor_qc::{Dataset, QcEngine, compute_quality_score};

/// Synthetic hourly mast record with a few injected faults
fn create_mast_dataset(points: usize) -> Dataset {
    let start = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
    let times = (0..points)
        .map(|h| start + Duration::hours(h as i64))
        .collect();

    let wind_speed = (0..points)
        .map(|i| match i % 997 {
            500 => 120.0,
            600..=610 => 4.0,
            _ => 6.0 + 3.0 * (i as f64 / 24.0).sin(),
        })
        .collect();
    let wind_direction = (0..points)
        .map(|i| (i as f64 * 7.5).rem_euclid(360.0))
        .collect();
    let temperature = (0..points)
        .map(|i| {
            if i % 1_001 == 17 {
                f64::NAN
            } else {
                8.0 + 6.0 * (i as f64 / 24.0 * std::f64::consts::TAU).sin()
            }
        })
        .collect();

    Dataset::new()
        .with_source("benchmark")
        .with_time(times)
        .and_then(|d| d.with_variable("wind_speed", wind_speed))
        .and_then(|d| d.with_variable("wind_direction", wind_direction))
        .and_then(|d| d.with_variable("temperature", temperature))
        .unwrap()
}

fn bench_full_run(c: &mut Criterion) {
    let engine = QcEngine::new();
    let mut group = c.benchmark_group("engine_run");

    for points in [1_000, 10_000, 100_000] {
        let dataset = create_mast_dataset(points);
        group.bench_with_input(BenchmarkId::from_parameter(points), &dataset, |b, dataset| {
            b.iter(|| {
                let report = engine.run(dataset, None, None).unwrap();
                std::hint::black_box(report);
            });
        });
    }
    group.finish();
}

fn bench_single_checks(c: &mut Criterion) {
    let engine = QcEngine::new();
    let dataset = create_mast_dataset(10_000);
    let mut group = c.benchmark_group("single_check");

    for check in engine.registry().list_checks() {
        group.bench_function(check, |b| {
            b.iter(|| {
                let flags = engine
                    .run_single_check(check, &dataset, "wind_speed")
                    .unwrap();
                std::hint::black_box(flags);
            });
        });
    }
    group.finish();
}

fn bench_scoring(c: &mut Criterion) {
    let dataset = create_mast_dataset(100_000);
    let report = QcEngine::new().run(&dataset, None, None).unwrap();

    c.bench_function("quality_score", |b| {
        b.iter(|| std::hint::black_box(compute_quality_score(&report)));
    });
}

criterion_group!(benches, bench_full_run, bench_single_checks, bench_scoring);
criterion_main!(benches);
