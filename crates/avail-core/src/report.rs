//! Availability report assembly.
//!
//! Buckets the fetched busy periods by day, scans every working day in the
//! requested range and collects the free slots into a date-ordered report.
//! Days are independent of one another, so they are scanned in parallel.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;

use crate::normalize::bucket_by_day;
use crate::scan::scan_day;
use crate::types::{BusyPeriod, FreeSlot};
use crate::window::{DateRange, WorkingHours};

/// Everything needed to compute availability, validated up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailabilityRequest {
    pub range: DateRange,
    pub hours: WorkingHours,
    pub minimum_slot_minutes: u32,
}

/// Free slots per working day, in chronological order.
///
/// Weekend dates never appear. A working day with no free slot is present
/// with an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityReport {
    days: BTreeMap<NaiveDate, Vec<FreeSlot>>,
}

impl AvailabilityReport {
    /// Iterate over `(date, slots)` in date order.
    pub fn days(&self) -> impl Iterator<Item = (NaiveDate, &[FreeSlot])> {
        self.days.iter().map(|(date, slots)| (*date, slots.as_slice()))
    }

    /// The slots for one date, or `None` if the date was not scanned.
    #[must_use]
    pub fn slots(&self, date: NaiveDate) -> Option<&[FreeSlot]> {
        self.days.get(&date).map(Vec::as_slice)
    }

    /// Number of working days in the report.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Sum of all slot durations, in minutes.
    #[must_use]
    pub fn total_free_minutes(&self) -> i64 {
        self.days
            .values()
            .flatten()
            .map(|slot| slot.duration_minutes)
            .sum()
    }
}

impl FromIterator<(NaiveDate, Vec<FreeSlot>)> for AvailabilityReport {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Vec<FreeSlot>)>>(iter: I) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}

/// Compute free slots for every working day in the request's range.
///
/// `busy` may be in any order and may contain overlapping, duplicate or
/// zero-length periods, as well as periods outside the range.
pub fn find_availability(
    request: &AvailabilityRequest,
    busy: Vec<BusyPeriod>,
) -> AvailabilityReport {
    if request.hours.is_degenerate() {
        tracing::warn!(
            start = %request.hours.start(),
            end = %request.hours.end(),
            "working hours start at or after they end; every day will report no slots"
        );
    }

    tracing::debug!(
        busy_periods = busy.len(),
        start = %request.range.start(),
        end = %request.range.end(),
        "computing availability"
    );

    let days: BTreeMap<NaiveDate, Vec<FreeSlot>> = bucket_by_day(busy, &request.range)
        .into_par_iter()
        .filter_map(|(date, periods)| {
            let day = request.hours.working_day(date)?;
            let relevant: Vec<BusyPeriod> =
                periods.into_iter().filter(|p| day.touches(p)).collect();
            let slots = scan_day(&day, &relevant, request.minimum_slot_minutes);
            tracing::debug!(%date, busy = relevant.len(), free = slots.len(), "scanned day");
            Some((date, slots))
        })
        .collect();

    AvailabilityReport { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDateTime, NaiveTime};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        date(day).and_hms_opt(hour, minute, 0).unwrap()
    }

    fn busy(start: NaiveDateTime, end: NaiveDateTime, subject: &str) -> BusyPeriod {
        BusyPeriod::new(start, end, subject).unwrap()
    }

    fn request(start: u32, end: u32, minimum_slot_minutes: u32) -> AvailabilityRequest {
        AvailabilityRequest {
            range: DateRange::new(date(start), date(end)).unwrap(),
            hours: WorkingHours::new(
                NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            ),
            minimum_slot_minutes,
        }
    }

    fn spans(slots: &[FreeSlot]) -> Vec<(NaiveDateTime, NaiveDateTime)> {
        slots.iter().map(|s| (s.start, s.end)).collect()
    }

    #[test]
    fn single_monday_with_meeting_and_reminder() {
        // 2024-03-18 is a Monday
        let periods = vec![
            busy(at(18, 9, 30), at(18, 11, 0), "A"),
            busy(at(18, 14, 0), at(18, 14, 0), "B"),
        ];
        let report = find_availability(&request(18, 18, 30), periods);

        assert_eq!(report.len(), 1);
        assert_eq!(
            spans(report.slots(date(18)).unwrap()),
            vec![
                (at(18, 8, 0), at(18, 9, 30)),
                (at(18, 11, 0), at(18, 17, 0)),
            ]
        );
    }

    #[test]
    fn weekends_are_excluded() {
        // Friday 15th through Monday 18th
        let report = find_availability(&request(15, 18, 30), Vec::new());

        let dates: Vec<_> = report.days().map(|(d, _)| d).collect();
        assert_eq!(dates, vec![date(15), date(18)]);
    }

    #[test]
    fn weekend_only_range_is_empty() {
        let report = find_availability(&request(16, 17, 30), Vec::new());
        assert!(report.is_empty());
    }

    #[test]
    fn fully_booked_day_is_present_with_no_slots() {
        let periods = vec![busy(at(18, 8, 0), at(18, 17, 0), "Workshop")];
        let report = find_availability(&request(18, 19, 30), periods);

        assert!(report.slots(date(18)).unwrap().is_empty());
        assert_eq!(report.slots(date(19)).unwrap().len(), 1);
    }

    #[test]
    fn evening_events_do_not_extend_slots_past_day_end() {
        let periods = vec![busy(at(18, 19, 0), at(18, 20, 0), "Dinner")];
        let report = find_availability(&request(18, 18, 30), periods);

        assert_eq!(
            spans(report.slots(date(18)).unwrap()),
            vec![(at(18, 8, 0), at(18, 17, 0))]
        );
    }

    #[test]
    fn overnight_event_blocks_next_morning() {
        // Monday 22:00 to Tuesday 10:00
        let periods = vec![busy(at(18, 22, 0), at(19, 10, 0), "Migration")];
        let report = find_availability(&request(18, 19, 30), periods);

        assert_eq!(
            spans(report.slots(date(18)).unwrap()),
            vec![(at(18, 8, 0), at(18, 17, 0))]
        );
        assert_eq!(
            spans(report.slots(date(19)).unwrap()),
            vec![(at(19, 10, 0), at(19, 17, 0))]
        );
    }

    #[test]
    fn unsorted_input_is_handled() {
        let periods = vec![
            busy(at(18, 15, 0), at(18, 16, 0), "late"),
            busy(at(18, 9, 0), at(18, 10, 0), "early"),
        ];
        let report = find_availability(&request(18, 18, 30), periods);

        assert_eq!(
            spans(report.slots(date(18)).unwrap()),
            vec![
                (at(18, 8, 0), at(18, 9, 0)),
                (at(18, 10, 0), at(18, 15, 0)),
                (at(18, 16, 0), at(18, 17, 0)),
            ]
        );
    }

    #[test]
    fn degenerate_hours_give_empty_days() {
        let mut req = request(18, 19, 0);
        req.hours = WorkingHours::new(
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        );
        let report = find_availability(&req, Vec::new());

        assert_eq!(report.len(), 2);
        assert!(report.days().all(|(_, slots)| slots.is_empty()));
    }

    #[test]
    fn total_free_minutes_sums_all_days() {
        let report = find_availability(&request(18, 19, 30), Vec::new());
        assert_eq!(report.total_free_minutes(), 2 * 540);
    }
}
