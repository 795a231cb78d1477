//! Tests for duration-based price lookups.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use rate_engine::{ParkingSpan, RateError, RateStore, WeeklySchedule, DEFAULT_RATE_CONFIG};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn standard() -> RateStore {
    RateStore::with_config(DEFAULT_RATE_CONFIG).expect("standard config must apply")
}

/// Wednesday with adjacent intervals `[0600,1800)@1750` and `[1800,2100)@1500`.
fn adjacent_wednesday() -> WeeklySchedule {
    let mut schedule = WeeklySchedule::empty();
    schedule
        .apply_config(
            r#"{"rates":[
                {"days":"wed","times":"0600-1800","price":1750},
                {"days":"wed","times":"1800-2100","price":1500}
            ]}"#,
        )
        .unwrap();
    schedule
}

fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

// ── Standard configuration ──────────────────────────────────────────────────

#[test]
fn wednesday_daytime_is_1750() {
    let price = standard()
        .quote("2015-07-01T07:00:00Z", "2015-07-01T16:00:00Z")
        .unwrap();
    assert_eq!(price, 1750);
}

#[test]
fn window_opening_minute_is_included() {
    let price = standard()
        .quote("2018-05-02T06:00:00Z", "2018-05-02T16:30:00Z")
        .unwrap();
    assert_eq!(price, 1750);
}

#[test]
fn one_second_before_window_is_unavailable() {
    let err = standard()
        .quote("2018-05-02T05:59:59Z", "2018-05-02T16:30:00Z")
        .unwrap_err();
    assert!(matches!(err, RateError::RateUnavailable { minute: 359, .. }));
    assert!(err.is_unavailable());
}

#[test]
fn tuesday_spanning_two_rates_is_rejected() {
    // 06:00 is in the 925 early rate, 16:30 in the 1500 day rate.
    let err = standard()
        .quote("2018-05-01T06:00:00Z", "2018-05-01T16:30:00Z")
        .unwrap_err();
    assert!(matches!(err, RateError::RangeMismatch { .. }));
}

#[test]
fn different_days_are_rejected() {
    let err = standard()
        .quote("2018-05-02T06:00:00Z", "2018-05-09T16:30:00Z")
        .unwrap_err();
    assert!(matches!(err, RateError::CrossDay { .. }));
}

#[test]
fn same_day_of_year_in_different_years_is_rejected() {
    let store = standard();
    let err = store
        .lookup_price(&utc(2018, 5, 2, 7, 0, 0), &utc(2019, 5, 2, 8, 0, 0))
        .unwrap_err();
    assert!(matches!(err, RateError::CrossDay { .. }));
}

#[test]
fn end_of_window_is_exclusive() {
    let store = standard();
    assert!(store.quote("2015-07-01T07:00:00Z", "2015-07-01T17:59:59Z").is_ok());
    let err = store
        .quote("2015-07-01T07:00:00Z", "2015-07-01T18:00:00Z")
        .unwrap_err();
    assert!(matches!(err, RateError::RateUnavailable { minute: 1080, .. }));
}

#[test]
fn local_offset_decides_the_weekday_and_minute() {
    // Tuesday 20:00 at -05:00 is Wednesday 01:00 UTC; the local reading wins.
    let price = standard()
        .quote("2015-06-30T20:00:00-05:00", "2015-06-30T20:30:00-05:00")
        .unwrap();
    assert_eq!(price, 1500);
}

// ── Adjacent intervals ──────────────────────────────────────────────────────

#[test]
fn crossing_into_coverage_is_unavailable() {
    let schedule = adjacent_wednesday();
    let err = schedule
        .lookup_price(&utc(2018, 5, 2, 5, 59, 59), &utc(2018, 5, 2, 18, 30, 0))
        .unwrap_err();
    assert!(matches!(err, RateError::RateUnavailable { .. }));
}

#[test]
fn points_in_adjacent_intervals_mismatch() {
    let schedule = adjacent_wednesday();
    let err = schedule
        .lookup_price(&utc(2018, 5, 2, 7, 0, 0), &utc(2018, 5, 2, 18, 30, 0))
        .unwrap_err();
    match err {
        RateError::RangeMismatch { start, end } => {
            assert_eq!(start.price, 1750);
            assert_eq!(end.price, 1500);
        }
        other => panic!("expected RangeMismatch, got {other:?}"),
    }
}

#[test]
fn equal_prices_in_different_ranges_still_mismatch() {
    let mut schedule = WeeklySchedule::empty();
    schedule
        .apply_config(
            r#"{"rates":[
                {"days":"wed","times":"0600-1200","price":1000},
                {"days":"wed","times":"1200-1800","price":1000}
            ]}"#,
        )
        .unwrap();

    let err = schedule
        .lookup_price(&utc(2018, 5, 2, 7, 0, 0), &utc(2018, 5, 2, 13, 0, 0))
        .unwrap_err();
    assert!(matches!(err, RateError::RangeMismatch { .. }));
}

#[test]
fn zero_length_request_inside_interval() {
    let schedule = adjacent_wednesday();
    let t = utc(2018, 5, 2, 18, 0, 0);
    assert_eq!(schedule.lookup_price(&t, &t).unwrap(), 1500);
}

// ── Spans ───────────────────────────────────────────────────────────────────

#[test]
fn lookup_span_matches_quote() {
    let store = standard();
    let span = ParkingSpan::parse("2015-07-05T09:00:00Z", "2015-07-05T20:59:00Z").unwrap();
    assert_eq!(store.lookup_span(&span).unwrap(), 2000);
}

#[test]
fn fixed_offset_values_look_up_directly() {
    let schedule = adjacent_wednesday();
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let start = tz.with_ymd_and_hms(2018, 5, 2, 19, 0, 0).unwrap();
    let end = tz.with_ymd_and_hms(2018, 5, 2, 20, 59, 0).unwrap();
    assert_eq!(schedule.lookup_price(&start, &end).unwrap(), 1500);
}

#[test]
fn malformed_timestamps_are_not_unavailability() {
    let err = standard()
        .quote("2015-07-01 07:00", "2015-07-01T16:00:00Z")
        .unwrap_err();
    assert!(matches!(err, RateError::InvalidTimestamp { field: "start", .. }));
    assert!(!err.is_unavailable());
}
