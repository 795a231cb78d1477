//! The weekly rate table: one [`IntervalIndex`] per weekday.
//!
//! Configuration passes are all-or-nothing. [`WeeklySchedule::apply_config`]
//! builds on a scratch copy and only replaces `self` once every entry of the
//! text has been parsed, conflict-checked and inserted.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};
use tracing::debug;

use crate::config::{RateConfig, RateConfigEntry};
use crate::error::{RateError, Result};
use crate::interval::{IntervalIndex, PricedInterval};

/// Days in [`WeeklySchedule::intervals`] order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Seven interval indexes, Monday through Sunday, all present from
/// construction.
///
/// `Clone` is a deep copy: the clone shares nothing with the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [IntervalIndex; 7],
}

impl WeeklySchedule {
    /// A schedule with every weekday present and empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An independent copy, safe to modify while the source is being read.
    pub fn deep_copy(&self) -> Self {
        self.clone()
    }

    pub fn day(&self, weekday: Weekday) -> &IntervalIndex {
        &self.days[weekday.num_days_from_monday() as usize]
    }

    fn day_mut(&mut self, weekday: Weekday) -> &mut IntervalIndex {
        &mut self.days[weekday.num_days_from_monday() as usize]
    }

    /// Parse configuration text and insert every interval it describes.
    ///
    /// On any error `self` is left exactly as it was.
    pub fn apply_config(&mut self, text: &str) -> Result<()> {
        let config = RateConfig::from_json(text)?;
        self.apply(&config)
    }

    /// Insert every interval of an already-parsed configuration, all or
    /// nothing.
    pub fn apply(&mut self, config: &RateConfig) -> Result<()> {
        let mut scratch = self.clone();
        for entry in &config.rates {
            scratch.apply_entry(entry)?;
        }
        debug!(
            entries = config.rates.len(),
            intervals = scratch.len(),
            "applied rate configuration"
        );
        *self = scratch;
        Ok(())
    }

    fn apply_entry(&mut self, entry: &RateConfigEntry) -> Result<()> {
        let (start, end) = entry.minute_range()?;
        for weekday in entry.weekdays()? {
            let interval = PricedInterval::new(weekday, start, end, entry.price);
            self.conflict_check(&interval)?;
            self.day_mut(weekday).insert(interval);
        }
        Ok(())
    }

    /// Reject `interval` if its start or end minute is already covered on
    /// its weekday.
    ///
    /// Only the two boundary minutes are tested. An existing interval lying
    /// strictly inside `interval` is not reported.
    ///
    /// Both boundaries are looked up as covered minutes, so touching ranges
    /// depend on insertion order: with `A` present, a `B` whose end equals
    /// `A`'s start conflicts (that minute is inside `A`), while a `B` whose
    /// start equals `A`'s end does not.
    pub fn conflict_check(&self, interval: &PricedInterval) -> Result<()> {
        let day = self.day(interval.weekday);
        let existing = day
            .lookup(interval.start_minute)
            .or_else(|| day.lookup(interval.end_minute));
        match existing {
            Some(existing) => Err(RateError::Conflict {
                new: *interval,
                existing: *existing,
            }),
            None => Ok(()),
        }
    }

    /// The price for parking from `start` to `end`.
    ///
    /// Both timestamps must fall on the same calendar date and inside the
    /// very same interval; seconds are ignored.
    pub fn lookup_price<Tz: TimeZone>(
        &self,
        start: &DateTime<Tz>,
        end: &DateTime<Tz>,
    ) -> Result<u64> {
        let (start_date, end_date) = (start.date_naive(), end.date_naive());
        if start_date != end_date {
            return Err(RateError::CrossDay {
                start: start_date,
                end: end_date,
            });
        }

        let weekday = start.weekday();
        let day = self.day(weekday);
        let covering = |minute: u32| {
            day.lookup(minute)
                .ok_or(RateError::RateUnavailable { weekday, minute })
        };

        let start_rate = covering(minutes_since_midnight(start))?;
        let end_rate = covering(minutes_since_midnight(end))?;
        if start_rate != end_rate {
            return Err(RateError::RangeMismatch {
                start: *start_rate,
                end: *end_rate,
            });
        }
        Ok(start_rate.price)
    }

    /// Every interval, Monday through Sunday, ascending start within a day.
    pub fn intervals(&self) -> impl Iterator<Item = &PricedInterval> {
        self.days.iter().flat_map(IntervalIndex::iter)
    }

    pub fn len(&self) -> usize {
        self.days.iter().map(IntervalIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.iter().all(IntervalIndex::is_empty)
    }
}

/// `hour * 60 + minute` of the timestamp's local wall clock.
pub fn minutes_since_midnight<Tz: TimeZone>(t: &DateTime<Tz>) -> u32 {
    t.hour() * 60 + t.minute()
}
