//! Calendar event sources.
//!
//! A source performs the single bulk fetch of busy periods for a requested
//! range. It owns everything the core treats as external: reading the
//! calendar data, converting timestamps into the local time reference, and
//! dropping events that do not block time.
//!
//! All periods returned by a source are expressed as naive local times in the
//! source's [`TargetZone`].

mod file;
mod zone;

use std::path::PathBuf;

use avail_core::{BusyPeriod, RangeError};
use chrono::NaiveDateTime;
use thiserror::Error;

pub use file::FileSource;
pub use zone::TargetZone;

/// Source errors.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The events file could not be read.
    #[error("failed to read events file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The events file is not valid event JSON.
    #[error("invalid events file {}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// An event timestamp could not be parsed or does not exist locally.
    #[error("invalid timestamp for event {subject:?}: {value}")]
    InvalidTimestamp { subject: String, value: String },
    /// A time zone name is not a known IANA zone.
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
    /// An event ends before it starts.
    #[error("event {subject:?} ends before it starts")]
    InvertedEvent {
        subject: String,
        #[source]
        source: RangeError,
    },
}

/// Something that can list the busy periods in a range.
///
/// Implementations return every busy period that overlaps
/// `[range_start, range_end)`, in any order. A fetch either succeeds
/// completely or fails; there are no partial results.
pub trait BusySource {
    fn fetch_busy_periods(
        &self,
        range_start: NaiveDateTime,
        range_end: NaiveDateTime,
    ) -> Result<Vec<BusyPeriod>, SourceError>;
}

/// An in-memory source, for callers that already hold their events.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    periods: Vec<BusyPeriod>,
}

impl MemorySource {
    pub const fn new(periods: Vec<BusyPeriod>) -> Self {
        Self { periods }
    }
}

impl BusySource for MemorySource {
    fn fetch_busy_periods(
        &self,
        range_start: NaiveDateTime,
        range_end: NaiveDateTime,
    ) -> Result<Vec<BusyPeriod>, SourceError> {
        Ok(self
            .periods
            .iter()
            .filter(|p| overlaps_range(p, range_start, range_end))
            .cloned()
            .collect())
    }
}

/// True when the period overlaps `[range_start, range_end)`.
///
/// Zero-length periods count when they sit inside the range.
pub fn overlaps_range(
    period: &BusyPeriod,
    range_start: NaiveDateTime,
    range_end: NaiveDateTime,
) -> bool {
    period.start() < range_end && (period.end() > range_start || period.start() >= range_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn busy(start: NaiveDateTime, end: NaiveDateTime) -> BusyPeriod {
        BusyPeriod::new(start, end, "event").unwrap()
    }

    #[test]
    fn overlap_includes_partial_and_zero_length() {
        let (start, end) = (at(18, 0), at(19, 0));

        assert!(overlaps_range(&busy(at(18, 9), at(18, 10)), start, end));
        assert!(overlaps_range(&busy(at(17, 22), at(18, 2)), start, end));
        assert!(overlaps_range(&busy(at(18, 23), at(19, 1)), start, end));
        assert!(overlaps_range(&busy(at(18, 0), at(18, 0)), start, end));

        assert!(!overlaps_range(&busy(at(17, 9), at(18, 0)), start, end));
        assert!(!overlaps_range(&busy(at(19, 0), at(19, 1)), start, end));
        assert!(!overlaps_range(&busy(at(19, 0), at(19, 0)), start, end));
    }

    #[test]
    fn memory_source_filters_to_range() {
        let source = MemorySource::new(vec![
            busy(at(17, 9), at(17, 10)),
            busy(at(18, 9), at(18, 10)),
            busy(at(20, 9), at(20, 10)),
        ]);

        let periods = source.fetch_busy_periods(at(18, 0), at(19, 0)).unwrap();
        assert_eq!(periods, vec![busy(at(18, 9), at(18, 10))]);
    }
}
