//! Response encoders for quotes, spans, checks and schedule dumps.
//!
//! The schedule never formats its own output; the front end picks an
//! [`OutputFormat`] and hands it the values to render. JSON and XML come from
//! the same serde derives; the XML root element is named after the response.

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use rate_engine::{ParkingSpan, PricedInterval};
use serde::ser::Serializer;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Xml,
    Text,
}

/// A priced amount, or `"unavailable"` when no single rate covers the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotedPrice {
    Amount(u64),
    Unavailable,
}

impl Serialize for QuotedPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            QuotedPrice::Amount(price) => serializer.serialize_u64(*price),
            QuotedPrice::Unavailable => serializer.serialize_str("unavailable"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub price: QuotedPrice,
}

/// The parsed span echoed back with its length.
#[derive(Debug, Clone, Serialize)]
pub struct SpanReport {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    /// ISO 8601, e.g. `PT32400S`.
    pub duration: String,
    pub duration_minutes: i64,
}

impl From<&ParkingSpan> for SpanReport {
    fn from(span: &ParkingSpan) -> Self {
        let duration = span.duration();
        Self {
            start: span.start,
            end: span.end,
            duration: duration.to_string(),
            duration_minutes: duration.num_minutes(),
        }
    }
}

/// Outcome of validating a configuration that applied cleanly.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CheckReport {
    pub valid: bool,
    pub intervals: usize,
}

#[derive(Debug, Serialize)]
struct ScheduleDump<'a> {
    intervals: Vec<&'a PricedInterval>,
}

impl OutputFormat {
    fn render<T: Serialize>(
        self,
        root: &str,
        value: &T,
        text: impl FnOnce(&T) -> String,
    ) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::Xml => Ok(quick_xml::se::to_string_with_root(root, value)?),
            OutputFormat::Text => Ok(text(value)),
        }
    }

    pub fn quote(self, quote: &Quote) -> Result<String> {
        self.render("quote", quote, |quote| {
            let price = match quote.price {
                QuotedPrice::Amount(price) => price.to_string(),
                QuotedPrice::Unavailable => "unavailable".to_string(),
            };
            format!(
                "{} .. {}: {}",
                quote.start.to_rfc3339(),
                quote.end.to_rfc3339(),
                price
            )
        })
    }

    pub fn span(self, report: &SpanReport) -> Result<String> {
        self.render("duration", report, |report| {
            format!(
                "{} .. {}: {} minutes",
                report.start.to_rfc3339(),
                report.end.to_rfc3339(),
                report.duration_minutes
            )
        })
    }

    pub fn check(self, report: &CheckReport) -> Result<String> {
        self.render("check", report, |report| {
            format!("ok: {} intervals", report.intervals)
        })
    }

    pub fn schedule<'a>(
        self,
        intervals: impl Iterator<Item = &'a PricedInterval>,
    ) -> Result<String> {
        let dump = ScheduleDump {
            intervals: intervals.collect(),
        };
        if self == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(&dump)?);
        }
        self.render("schedule", &dump, |dump| {
            dump.intervals
                .iter()
                .map(|interval| interval.to_string())
                .collect::<Vec<_>>()
                .join("\n")
        })
    }
}
