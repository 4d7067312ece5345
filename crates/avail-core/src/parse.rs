//! Parsing of user-supplied dates and times of day.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate, NaiveTime};
use regex::Regex;

use crate::error::ConfigError;

/// Pre-compiled regex for times of day: `08:00`, `17:30:15`, `5 PM`, `9:15am`.
static TIME_OF_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})(?::(\d{2})(?::(\d{2}))?)?\s*(am|pm)?$").unwrap()
});

/// Pre-compiled regex for relative dates: `in 3 days`, `in 2 weeks`.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^in\s+(\d+)\s+(day|week)s?$").unwrap());

/// Conservative bound for relative dates (~100 years in days).
const MAX_RELATIVE_DAYS: u64 = 100 * 366;

/// Parse a time of day in 24-hour or 12-hour notation.
///
/// Supports:
/// - 24-hour: "08:00", "17:30", "17:30:15"
/// - 12-hour: "8:00 AM", "5:30pm", "5 PM"
///
/// A bare hour without AM/PM is rejected as ambiguous.
pub fn parse_time_of_day(field: &'static str, value: &str) -> Result<NaiveTime, ConfigError> {
    let invalid = || ConfigError::InvalidTime {
        field,
        value: value.to_string(),
    };

    let caps = TIME_OF_DAY_RE.captures(value.trim()).ok_or_else(invalid)?;
    let number = |idx: usize| -> Result<u32, ConfigError> {
        caps.get(idx)
            .map_or(Ok(0), |m| m.as_str().parse().map_err(|_| invalid()))
    };

    let mut hour = number(1)?;
    let minute = number(2)?;
    let second = number(3)?;

    match caps.get(4).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return Err(invalid());
            }
            hour %= 12;
            if meridiem == "pm" {
                hour += 12;
            }
        }
        None if caps.get(2).is_none() => return Err(invalid()),
        None => {}
    }

    NaiveTime::from_hms_opt(hour, minute, second).ok_or_else(invalid)
}

/// Parse a calendar date as ISO 8601 or relative to `today`.
///
/// Supports:
/// - ISO 8601: "2024-03-18"
/// - Keywords: "today", "tomorrow"
/// - Relative: "in 3 days", "in 1 week"
pub fn parse_date(
    field: &'static str,
    value: &str,
    today: NaiveDate,
) -> Result<NaiveDate, ConfigError> {
    let invalid = || ConfigError::InvalidDate {
        field,
        value: value.to_string(),
    };
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return today.succ_opt().ok_or_else(invalid),
        _ => {}
    }

    let caps = RELATIVE_DATE_RE.captures(trimmed).ok_or_else(invalid)?;
    let n: u64 = caps[1].parse().map_err(|_| invalid())?;
    let days = if caps[2].eq_ignore_ascii_case("week") {
        n.checked_mul(7).ok_or_else(invalid)?
    } else {
        n
    };

    if days > MAX_RELATIVE_DAYS {
        return Err(invalid());
    }

    today.checked_add_days(Days::new(days)).ok_or_else(invalid)
}
