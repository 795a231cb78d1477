//! RFC 3339 parking spans.
//!
//! Timestamps keep the UTC offset they were written with; weekday and
//! time-of-day are read from that offset, never normalized.

use chrono::{DateTime, Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::error::{RateError, Result};

/// A requested parking period with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpan {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl ParkingSpan {
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Result<Self> {
        if end < start {
            return Err(RateError::EndBeforeStart {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    /// Parse both ends from RFC 3339 text.
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::new(parse_timestamp("start", start)?, parse_timestamp("end", end)?)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

fn parse_timestamp(field: &'static str, value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).map_err(|e| RateError::InvalidTimestamp {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
