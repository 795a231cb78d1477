use chrono::{TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use rate_engine::{RateStore, WeeklySchedule, DEFAULT_RATE_CONFIG};
use std::hint::black_box;

/// A dense configuration: 48 half-hour rates on every day.
fn dense_config() -> String {
    let rates: Vec<serde_json::Value> = (0..48u32)
        .map(|slot| {
            let (start, end) = (slot * 30, slot * 30 + 30);
            serde_json::json!({
                "days": "mon,tues,wed,thurs,fri,sat,sun",
                "times": format!(
                    "{:02}{:02}-{:02}{:02}",
                    start / 60,
                    start % 60,
                    end / 60,
                    end % 60
                ),
                "price": 100 + slot,
            })
        })
        .collect();
    serde_json::json!({ "rates": rates }).to_string()
}

fn bench_lookup(c: &mut Criterion) {
    let standard = RateStore::with_config(DEFAULT_RATE_CONFIG).unwrap();
    let dense = RateStore::with_config(&dense_config()).unwrap();
    let start = Utc.with_ymd_and_hms(2015, 7, 1, 7, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2015, 7, 1, 16, 0, 0).unwrap();
    let late_start = Utc.with_ymd_and_hms(2015, 7, 1, 23, 31, 0).unwrap();
    let late_end = Utc.with_ymd_and_hms(2015, 7, 1, 23, 45, 0).unwrap();

    c.bench_function("lookup_standard", |b| {
        b.iter(|| standard.lookup_price(black_box(&start), black_box(&end)))
    });
    c.bench_function("lookup_dense_last_slot", |b| {
        b.iter(|| dense.lookup_price(black_box(&late_start), black_box(&late_end)))
    });
}

fn bench_apply(c: &mut Criterion) {
    let dense = dense_config();

    c.bench_function("apply_standard", |b| {
        b.iter(|| {
            let mut schedule = WeeklySchedule::empty();
            schedule.apply_config(black_box(DEFAULT_RATE_CONFIG)).unwrap();
            schedule
        })
    });
    c.bench_function("apply_dense", |b| {
        b.iter(|| {
            let mut schedule = WeeklySchedule::empty();
            schedule.apply_config(black_box(&dense)).unwrap();
            schedule
        })
    });
}

criterion_group!(benches, bench_lookup, bench_apply);
criterion_main!(benches);
