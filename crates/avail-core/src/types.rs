//! Interval types shared by the normalizer and the scanner.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::RangeError;

/// A half-open span of local time, `[start, end)`.
///
/// The constructor guarantees `start <= end`; zero-length ranges are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TimeRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeRange {
    /// Creates a range, rejecting one that ends before it starts.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, RangeError> {
        if end < start {
            return Err(RangeError { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whole minutes between start and end, truncated.
    #[must_use]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Split at `at`, clamped into the range, into `[start, at)` and `[at, end)`.
    pub(crate) fn split_at(self, at: NaiveDateTime) -> (Self, Self) {
        let at = at.clamp(self.start, self.end);
        (
            Self {
                start: self.start,
                end: at,
            },
            Self { start: at, end: self.end },
        )
    }

    /// True when the range covers no time at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// One occurrence of a calendar event that blocks time.
///
/// Busy periods arrive already localized; they may overlap one another or be
/// zero-length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusyPeriod {
    range: TimeRange,
    subject: String,
}

impl BusyPeriod {
    /// Creates a busy period, rejecting one that ends before it starts.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        subject: impl Into<String>,
    ) -> Result<Self, RangeError> {
        Ok(Self {
            range: TimeRange::new(start, end)?,
            subject: subject.into(),
        })
    }

    pub(crate) fn from_range(range: TimeRange, subject: String) -> Self {
        Self { range, subject }
    }

    #[must_use]
    pub const fn range(&self) -> TimeRange {
        self.range
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.range.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.range.end
    }

    /// The calendar date the period is bucketed under.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.range.start.date()
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// A free slot within a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeSlot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
}

impl FreeSlot {
    pub(crate) fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start,
            end,
            duration_minutes: (end - start).num_minutes(),
        }
    }
}
