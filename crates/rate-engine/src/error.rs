//! Error types for rate-engine operations.

use chrono::{NaiveDate, Weekday};
use thiserror::Error;

use crate::interval::PricedInterval;

#[derive(Error, Debug)]
pub enum RateError {
    /// The configuration text was not valid JSON for a rate configuration.
    #[error("could not parse rate configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("'{0}' is not a recognized weekday")]
    UnknownDay(String),

    #[error("invalid time range '{range}': {reason}")]
    InvalidTimeRange { range: String, reason: String },

    /// A new interval has a boundary minute inside an interval already stored.
    #[error("new rate {new} conflicts with existing rate {existing}")]
    Conflict {
        new: PricedInterval,
        existing: PricedInterval,
    },

    #[error("start and end times must be on the same day: start={start}, end={end}")]
    CrossDay { start: NaiveDate, end: NaiveDate },

    #[error("rate unavailable: no rate exists on {weekday} for minute {minute}")]
    RateUnavailable { weekday: Weekday, minute: u32 },

    /// Start and end resolved to different intervals, even if the prices match.
    #[error("rate not in same time range: start in {start}, end in {end}")]
    RangeMismatch {
        start: PricedInterval,
        end: PricedInterval,
    },

    #[error("no rate schedule has been published")]
    NoActiveSchedule,

    #[error("could not parse '{field}' parameter [{value}]: {reason}")]
    InvalidTimestamp {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("end time {end} occurs before start time {start}")]
    EndBeforeStart { start: String, end: String },
}

impl RateError {
    /// Whether this error is an expected lookup outcome ("price unavailable")
    /// rather than a fault in the request or the configuration.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            RateError::CrossDay { .. }
                | RateError::RateUnavailable { .. }
                | RateError::RangeMismatch { .. }
                | RateError::NoActiveSchedule
        )
    }
}

pub type Result<T> = std::result::Result<T, RateError>;
