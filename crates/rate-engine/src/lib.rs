//! # rate-engine
//!
//! Weekly recurring parking rates with conflict-checked updates.
//!
//! A rate table stores, for each day of the week, a set of priced half-open
//! time intervals. It is built from a JSON rate configuration, merged with
//! further configuration passes that are rejected as a whole if any interval
//! conflicts, and queried with a `(start, end)` pair on a single day.
//!
//! ```rust
//! use rate_engine::{RateStore, DEFAULT_RATE_CONFIG};
//!
//! let store = RateStore::with_config(DEFAULT_RATE_CONFIG).unwrap();
//! let price = store
//!     .quote("2015-07-01T07:00:00Z", "2015-07-01T16:00:00Z")
//!     .unwrap();
//! assert_eq!(price, 1750);
//! ```
//!
//! ## Modules
//!
//! - [`interval`] — priced intervals and the per-day interval index
//! - [`schedule`] — seven interval indexes, configuration passes, price lookup
//! - [`config`] — rate configuration text, day tokens and `HHMM-HHMM` ranges
//! - [`span`] — RFC 3339 start/end pairs
//! - [`store`] — the atomically published active schedule
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod interval;
pub mod schedule;
pub mod span;
pub mod store;

pub use config::{RateConfig, RateConfigEntry, DEFAULT_RATE_CONFIG};
pub use error::RateError;
pub use interval::{IntervalIndex, PricedInterval};
pub use schedule::WeeklySchedule;
pub use span::ParkingSpan;
pub use store::RateStore;
