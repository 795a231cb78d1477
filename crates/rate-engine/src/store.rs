//! The active rate schedule.
//!
//! A [`RateStore`] holds a single reference to the schedule currently in
//! effect. Readers take an `Arc` snapshot and query it without taking any
//! lock. Writers build a new schedule off to the side and publish it with one
//! pointer assignment, so a reader sees either the old table or the new one,
//! never a partial merge.
//!
//! Writers are not serialized against each other: two racing
//! [`RateStore::update_rates`] calls may both start from the same snapshot,
//! and the last publish wins.

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use chrono::{DateTime, TimeZone};
use tracing::{info, warn};

use crate::error::{RateError, Result};
use crate::schedule::WeeklySchedule;
use crate::span::ParkingSpan;

#[derive(Debug, Default)]
pub struct RateStore {
    active: ArcSwapOption<WeeklySchedule>,
}

impl RateStore {
    /// A store with nothing published.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store initialized by replacing with `text`.
    pub fn with_config(text: &str) -> Result<Self> {
        let store = Self::new();
        store.replace_rates(text)?;
        Ok(store)
    }

    /// The schedule in effect right now, if any has been published.
    pub fn snapshot(&self) -> Option<Arc<WeeklySchedule>> {
        self.active.load_full()
    }

    fn publish(&self, schedule: WeeklySchedule) {
        let intervals = schedule.len();
        self.active.store(Some(Arc::new(schedule)));
        info!(intervals, "published rate schedule");
    }

    /// Discard the current schedule in favor of one built from `text` alone.
    ///
    /// On failure the active schedule, or the lack of one, is unchanged.
    pub fn replace_rates(&self, text: &str) -> Result<()> {
        let mut schedule = WeeklySchedule::empty();
        if let Err(e) = schedule.apply_config(text) {
            warn!(error = %e, "failed to replace rates");
            return Err(e);
        }
        self.publish(schedule);
        Ok(())
    }

    /// Merge the rates in `text` into a copy of the active schedule and
    /// publish the copy.
    ///
    /// With nothing published yet the copy starts empty. On failure the
    /// active schedule is unchanged.
    pub fn update_rates(&self, text: &str) -> Result<()> {
        let mut schedule = self
            .snapshot()
            .map(|active| active.deep_copy())
            .unwrap_or_default();
        if let Err(e) = schedule.apply_config(text) {
            warn!(error = %e, "failed to update rates");
            return Err(e);
        }
        self.publish(schedule);
        Ok(())
    }

    /// Price for `start..end` against the schedule active at call time.
    pub fn lookup_price<Tz: TimeZone>(
        &self,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<u64> {
        let schedule = self.snapshot().ok_or(RateError::NoActiveSchedule)?;
        schedule.lookup_price(start, end)
    }

    pub fn lookup_span(&self, span: &ParkingSpan) -> Result<u64> {
        self.lookup_price(&span.start, &span.end)
    }

    /// Parse RFC 3339 `start` and `end`, then look up the price.
    pub fn quote(&self, start: &str, end: &str) -> Result<u64> {
        self.lookup_span(&ParkingSpan::parse(start, end)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_RATE_CONFIG;

    #[test]
    fn new_store_has_no_schedule() {
        let store = RateStore::new();
        assert!(store.snapshot().is_none());
        let err = store
            .quote("2015-07-01T07:00:00Z", "2015-07-01T16:00:00Z")
            .unwrap_err();
        assert!(matches!(err, RateError::NoActiveSchedule));
        assert!(err.is_unavailable());
    }

    #[test]
    fn failed_initial_replace_publishes_nothing() {
        let store = RateStore::new();
        assert!(store.replace_rates("not json").is_err());
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn update_on_empty_store_starts_from_empty_schedule() {
        let store = RateStore::new();
        store.update_rates(DEFAULT_RATE_CONFIG).unwrap();
        assert_eq!(store.snapshot().unwrap().len(), 12);
    }

    #[test]
    fn publish_swaps_the_reference_and_leaves_held_snapshots_alone() {
        let store = RateStore::with_config(DEFAULT_RATE_CONFIG).unwrap();
        let held = store.snapshot().unwrap();
        assert!(Arc::ptr_eq(&held, &store.snapshot().unwrap()));

        store
            .replace_rates(r#"{"rates":[{"days":"mon","times":"0600-1800","price":1}]}"#)
            .unwrap();

        let current = store.snapshot().unwrap();
        assert!(!Arc::ptr_eq(&held, &current));
        assert_eq!(held.len(), 12);
        assert_eq!(current.len(), 1);
    }
}
