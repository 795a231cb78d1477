//! Priced intervals and the per-day interval index.
//!
//! A [`PricedInterval`] is a half-open range `[start_minute, end_minute)` of
//! minutes since midnight on one weekday, carrying a price. An
//! [`IntervalIndex`] holds the intervals of a single day keyed by start
//! minute, so iteration and lookups always run in ascending start order.

use std::collections::BTreeMap;
use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A price that applies on one weekday between two minute offsets.
///
/// Equality is structural: two intervals are equal only when day, both
/// boundaries and price all match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PricedInterval {
    pub weekday: Weekday,
    /// Minutes since midnight, inclusive.
    pub start_minute: u32,
    /// Minutes since midnight, exclusive.
    pub end_minute: u32,
    pub price: u64,
}

impl PricedInterval {
    pub fn new(weekday: Weekday, start_minute: u32, end_minute: u32, price: u64) -> Self {
        Self {
            weekday,
            start_minute,
            end_minute,
            price,
        }
    }

    /// True when `minute` falls in `[start_minute, end_minute)`.
    pub fn covers(&self, minute: u32) -> bool {
        minute >= self.start_minute && minute < self.end_minute
    }
}

impl fmt::Display for PricedInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{} {:02}{:02}-{:02}{:02} @{}}}",
            self.weekday,
            self.start_minute / 60,
            self.start_minute % 60,
            self.end_minute / 60,
            self.end_minute % 60,
            self.price
        )
    }
}

/// The intervals of a single weekday, keyed by start minute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntervalIndex {
    intervals: BTreeMap<u32, PricedInterval>,
}

impl IntervalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an interval under its own start minute.
    ///
    /// No conflict check happens here; callers run
    /// [`WeeklySchedule::conflict_check`](crate::schedule::WeeklySchedule::conflict_check)
    /// first. Re-inserting an identical interval leaves the index unchanged.
    pub fn insert(&mut self, interval: PricedInterval) {
        self.intervals.insert(interval.start_minute, interval);
    }

    /// Stored start minutes in ascending order.
    pub fn sorted_start_offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.intervals.keys().copied()
    }

    /// The first interval, by ascending start, that covers `minute`.
    ///
    /// The scan is linear on purpose: the boundary-only conflict check lets
    /// a wide interval enclose a narrower one, and the earlier start must win
    /// in that case.
    pub fn lookup(&self, minute: u32) -> Option<&PricedInterval> {
        self.intervals.values().find(|interval| interval.covers(minute))
    }

    pub fn has_coverage(&self, minute: u32) -> bool {
        self.lookup(minute).is_some()
    }

    /// Intervals in ascending start order.
    pub fn iter(&self) -> impl Iterator<Item = &PricedInterval> {
        self.intervals.values()
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}
