//! Rate configuration text: the JSON model plus day-token and `HHMM-HHMM`
//! parsing.
//!
//! ```json
//! { "rates": [ { "days": "mon,tues,thurs", "times": "0900-2100", "price": 1500 } ] }
//! ```

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{RateError, Result};

/// The standard weekly rate configuration, used when no file is supplied.
pub const DEFAULT_RATE_CONFIG: &str = r#"{
    "rates": [
        { "days": "mon,tues,thurs", "times": "0900-2100", "price": 1500 },
        { "days": "fri,sat,sun", "times": "0900-2100", "price": 2000 },
        { "days": "wed", "times": "0600-1800", "price": 1750 },
        { "days": "mon,wed,sat", "times": "0100-0500", "price": 1000 },
        { "days": "sun,tues", "times": "0100-0700", "price": 925 }
    ]
}"#;

/// A whole configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfig {
    #[serde(default)]
    pub rates: Vec<RateConfigEntry>,
}

/// One configured rate: a time range applied to a list of days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateConfigEntry {
    /// Comma-separated day tokens, e.g. `"mon,wed,sat"`.
    pub days: String,
    /// `"HHMM-HHMM"`.
    pub times: String,
    pub price: u64,
}

impl RateConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl RateConfigEntry {
    /// The weekdays named by `days`, in the order given.
    pub fn weekdays(&self) -> Result<Vec<Weekday>> {
        self.days.split(',').map(parse_weekday).collect()
    }

    /// The `(start, end)` minute offsets named by `times`.
    pub fn minute_range(&self) -> Result<(u32, u32)> {
        parse_time_range(&self.times)
    }
}

/// Map an abbreviated day token to a weekday.
///
/// Tokens match exactly: `mon tues wed thurs fri sat sun`.
pub fn parse_weekday(token: &str) -> Result<Weekday> {
    match token {
        "mon" => Ok(Weekday::Mon),
        "tues" => Ok(Weekday::Tue),
        "wed" => Ok(Weekday::Wed),
        "thurs" => Ok(Weekday::Thu),
        "fri" => Ok(Weekday::Fri),
        "sat" => Ok(Weekday::Sat),
        "sun" => Ok(Weekday::Sun),
        other => Err(RateError::UnknownDay(other.to_string())),
    }
}

/// Parse `"HHMM"` into minutes since midnight.
///
/// Minutes of the hour must be below 60. Hours are only required to be
/// digits, so `"2500"` yields 1500.
pub fn parse_clock(text: &str) -> std::result::Result<u32, String> {
    if text.len() != 4 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("time must be 4 digits: {text}"));
    }
    let hours: u32 = text[0..2]
        .parse()
        .map_err(|_| format!("invalid hours in time: {text}"))?;
    let minutes: u32 = text[2..4]
        .parse()
        .map_err(|_| format!("invalid minutes in time: {text}"))?;
    if minutes >= 60 {
        return Err(format!("invalid minutes in time: {text}"));
    }
    Ok(hours * 60 + minutes)
}

/// Parse `"HHMM-HHMM"` into start and end minutes since midnight.
pub fn parse_time_range(range: &str) -> Result<(u32, u32)> {
    let invalid = |reason: String| RateError::InvalidTimeRange {
        range: range.to_string(),
        reason,
    };

    let parts: Vec<&str> = range.split('-').collect();
    let [start, end] = parts.as_slice() else {
        return Err(invalid("expected exactly two times separated by '-'".into()));
    };

    let start = parse_clock(start).map_err(|e| invalid(format!("invalid start time: {e}")))?;
    let end = parse_clock(end).map_err(|e| invalid(format!("invalid end time: {e}")))?;
    Ok((start, end))
}
