//! Core domain logic for the availability finder.
//!
//! This crate contains the fundamental types and logic for:
//! - Normalization: splitting busy periods at midnight and bucketing them by day
//! - Scanning: walking a day's busy periods to find free slots
//! - Reports: assembling per-day free slots over a date range

mod error;
pub mod normalize;
pub mod parse;
mod report;
pub mod scan;
mod types;
mod window;

pub use error::{ConfigError, RangeError};
pub use normalize::{bucket_by_day, split_at_midnight};
pub use parse::{parse_date, parse_time_of_day};
pub use report::{AvailabilityReport, AvailabilityRequest, find_availability};
pub use scan::scan_day;
pub use types::{BusyPeriod, FreeSlot, TimeRange};
pub use window::{DateRange, WorkingDay, WorkingHours};
