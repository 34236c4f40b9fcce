use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;

use queuequest::domain::{PlanMode, PlanRequest, Wishlist};
use queuequest::live::{LiveSnapshot, LiveStatus};
use queuequest::oracle::ForecastOracle;
use queuequest::planner::Planner;
use queuequest::transit::WalkingModel;
use venuecatalog::Catalog;

fn planner() -> Planner {
    Planner::new(
        Arc::new(Catalog::builtin().expect("builtin catalog")),
        Arc::new(WalkingModel::default()),
        Arc::new(ForecastOracle::default()),
    )
}

fn bench_priority(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority");
    let planner = planner();
    let day = NaiveDate::from_ymd_opt(2025, 6, 3).expect("valid date");
    let start = day.and_hms_opt(10, 0, 0).expect("valid time");
    let end = day.and_hms_opt(18, 0, 0).expect("valid time");

    let venue = planner.catalog().venue("EFTELING").expect("Efteling in catalog");
    let rides: Vec<String> = venue.rides().map(|a| a.name.clone()).collect();

    for size in [3usize, 8, rides.len()] {
        let (must, should) = rides[..size].split_at(size / 2);
        let request =
            PlanRequest::new("EFTELING", start, end).with_wishlist(Wishlist::new(must.iter().cloned(), should.iter().cloned()));
        group.bench_with_input(BenchmarkId::new("forecast_only", size), &request, |b, req| {
            b.iter(|| planner.plan(black_box(req), None));
        });
    }

    let snapshot = rides
        .iter()
        .enumerate()
        .fold(LiveSnapshot::new("EFTELING", start), |s, (i, name)| {
            s.with_status(name.clone(), LiveStatus::open((i as u32 * 5) % 60))
        });
    let request =
        PlanRequest::new("EFTELING", start, end).with_wishlist(Wishlist::new(rides.iter().cloned(), Vec::<String>::new()));
    group.bench_function("with_live", |b| {
        b.iter(|| planner.plan(black_box(&request), Some(&snapshot)));
    });

    group.finish();
}

fn bench_max_value(c: &mut Criterion) {
    let planner = planner();
    let day = NaiveDate::from_ymd_opt(2025, 6, 3).expect("valid date");
    let request = PlanRequest::new(
        "WALIBI_BELGIUM",
        day.and_hms_opt(10, 0, 0).expect("valid time"),
        day.and_hms_opt(18, 0, 0).expect("valid time"),
    )
    .with_mode(PlanMode::MaxValue);

    c.bench_function("max_value_full_day", |b| {
        b.iter(|| planner.plan(black_box(&request), None));
    });
}

criterion_group!(benches, bench_priority, bench_max_value);
criterion_main!(benches);
