//! Error types for request validation.

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Invalid request configuration, reported before any calendar fetch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A time-of-day value could not be parsed.
    #[error("invalid {field}: {value:?} (expected a time of day such as 08:00 or 5:30 PM)")]
    InvalidTime { field: &'static str, value: String },

    /// A date value could not be parsed.
    #[error(
        "invalid {field}: {value:?} (expected YYYY-MM-DD, 'today', 'tomorrow' or 'in N days')"
    )]
    InvalidDate { field: &'static str, value: String },

    /// The end date falls before the start date.
    #[error("end date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

/// A time range whose end precedes its start.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("time range ends at {end} before it starts at {start}")]
pub struct RangeError {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}
