//! Date ranges and daily working windows.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::Serialize;

use crate::error::ConfigError;
use crate::types::BusyPeriod;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Creates a range, rejecting an end date before the start date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ConfigError> {
        if end < start {
            return Err(ConfigError::EndBeforeStart { start, end });
        }
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Every date in the range, in chronological order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Half-open instant bounds covering the whole range, midnight to midnight.
    ///
    /// The upper bound saturates at `NaiveDateTime::MAX` for the last
    /// representable date.
    #[must_use]
    pub fn bounds(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.start.and_time(NaiveTime::MIN);
        let end = self
            .end
            .succ_opt()
            .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));
        (start, end)
    }
}

/// The configured daily time-of-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkingHours {
    start: NaiveTime,
    end: NaiveTime,
}

impl WorkingHours {
    /// Creates a window. A window whose start is not before its end is allowed
    /// and yields no free slots; see [`Self::is_degenerate`].
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// True when the window covers no time, e.g. start 17:00 and end 08:00.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }

    /// The working day for `date`, or `None` on Saturday and Sunday.
    #[must_use]
    pub fn working_day(&self, date: NaiveDate) -> Option<WorkingDay> {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return None;
        }
        Some(WorkingDay {
            date,
            day_start: date.and_time(self.start),
            day_end: date.and_time(self.end),
        })
    }
}

/// A weekday with its concrete working window.
///
/// `day_start` may be after `day_end` when the configured window is
/// degenerate; scanning such a day yields nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkingDay {
    pub date: NaiveDate,
    pub day_start: NaiveDateTime,
    pub day_end: NaiveDateTime,
}

impl WorkingDay {
    /// True when the busy period intersects the working window or sits on it.
    ///
    /// Periods wholly before `day_start` or starting at or after `day_end`
    /// cannot affect the day's free slots.
    #[must_use]
    pub fn touches(&self, period: &BusyPeriod) -> bool {
        period.start() < self.day_end && period.end() > self.day_start
    }
}
