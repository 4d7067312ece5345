//! Interval normalization.
//!
//! Busy periods arrive as one flat, unordered list for the whole requested
//! range. Normalization splits periods that cross midnight into per-day
//! segments, then buckets the segments by start date and sorts each bucket.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::types::BusyPeriod;
use crate::window::DateRange;

/// Split a busy period into one segment per calendar day it touches.
///
/// A period that starts and ends on the same date (including a zero-length
/// one) is returned unchanged. Every segment keeps the original subject; no
/// zero-length tail is produced when a period ends exactly at midnight.
pub fn split_at_midnight(period: BusyPeriod) -> Vec<BusyPeriod> {
    if period.start().date() == period.end().date() {
        return vec![period];
    }

    let subject = period.subject().to_string();
    let mut segments = Vec::new();
    let mut rest = period.range();

    while rest.start().date() < rest.end().date() {
        let Some(next_day) = rest.start().date().succ_opt() else {
            break;
        };
        let (head, tail) = rest.split_at(next_day.and_time(NaiveTime::MIN));
        segments.push(BusyPeriod::from_range(head, subject.clone()));
        rest = tail;
    }

    if !rest.is_empty() {
        segments.push(BusyPeriod::from_range(rest, subject));
    }

    segments
}

/// Bucket busy periods by the date their (per-day) segment starts on.
///
/// Every date in `range` gets an entry, possibly empty. Segments dated outside
/// the range are dropped. Each bucket is sorted ascending by start, then end;
/// overlapping and duplicate periods are kept as they are.
pub fn bucket_by_day<I>(periods: I, range: &DateRange) -> BTreeMap<NaiveDate, Vec<BusyPeriod>>
where
    I: IntoIterator<Item = BusyPeriod>,
{
    let mut buckets: BTreeMap<NaiveDate, Vec<BusyPeriod>> =
        range.days().map(|date| (date, Vec::new())).collect();

    for segment in periods.into_iter().flat_map(split_at_midnight) {
        if let Some(bucket) = buckets.get_mut(&segment.date()) {
            bucket.push(segment);
        }
    }

    for bucket in buckets.values_mut() {
        bucket.sort_by_key(|p| (p.start(), p.end()));
    }

    buckets
}
