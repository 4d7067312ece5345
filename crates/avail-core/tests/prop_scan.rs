//! Property-based tests for free-slot scanning using proptest.
//!
//! These tests check invariants that should hold for *any* set of busy
//! periods on a working day, not just the examples in the unit tests.

use avail_core::{
    AvailabilityRequest, BusyPeriod, DateRange, FreeSlot, WorkingHours, bucket_by_day,
    find_availability, scan_day,
};
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use proptest::prelude::*;

const DAY_START_MIN: i64 = 8 * 60;
const DAY_END_MIN: i64 = 17 * 60;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A busy period as (start minute of day, length in minutes).
///
/// Starts range from 06:00 to just before the 17:00 window end, so some
/// periods begin before the window and some run past it.
fn arb_busy() -> impl Strategy<Value = (i64, i64)> {
    (6 * 60..DAY_END_MIN, 0i64..=240)
}

fn arb_busy_list() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec(arb_busy(), 0..12)
}

fn arb_minimum() -> impl Strategy<Value = u32> {
    0u32..=90
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 18).unwrap()
}

fn minute(offset: i64) -> NaiveDateTime {
    monday().and_time(NaiveTime::MIN) + Duration::minutes(offset)
}

fn hours() -> WorkingHours {
    WorkingHours::new(
        NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    )
}

fn to_periods(raw: &[(i64, i64)]) -> Vec<BusyPeriod> {
    raw.iter()
        .enumerate()
        .map(|(i, &(start, len))| {
            BusyPeriod::new(minute(start), minute(start + len), format!("event {i}")).unwrap()
        })
        .collect()
}

fn scan(raw: &[(i64, i64)], minimum: u32) -> Vec<FreeSlot> {
    let range = DateRange::new(monday(), monday()).unwrap();
    let buckets = bucket_by_day(to_periods(raw), &range);
    let day = hours().working_day(monday()).unwrap();
    scan_day(&day, &buckets[&monday()], minimum)
}

/// Brute-force reference: mark every busy minute of the window, then report
/// the maximal free runs that meet the minimum.
fn reference_slots(raw: &[(i64, i64)], minimum: u32) -> Vec<(NaiveDateTime, NaiveDateTime)> {
    let is_busy = |m: i64| raw.iter().any(|&(s, len)| len > 0 && s <= m && m < s + len);

    let mut runs = Vec::new();
    let mut run_start: Option<i64> = None;
    for m in DAY_START_MIN..=DAY_END_MIN {
        let free = m < DAY_END_MIN && !is_busy(m);
        match (free, run_start) {
            (true, None) => run_start = Some(m),
            (false, Some(s)) => {
                runs.push((s, m));
                run_start = None;
            }
            _ => {}
        }
    }

    runs.into_iter()
        .filter(|(s, e)| e - s >= i64::from(minimum))
        .map(|(s, e)| (minute(s), minute(e)))
        .collect()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn matches_brute_force_reference(raw in arb_busy_list(), minimum in arb_minimum()) {
        let slots = scan(&raw, minimum);
        let spans: Vec<_> = slots.iter().map(|s| (s.start, s.end)).collect();
        prop_assert_eq!(spans, reference_slots(&raw, minimum));
    }

    #[test]
    fn slots_meet_minimum_duration(raw in arb_busy_list(), minimum in arb_minimum()) {
        for slot in scan(&raw, minimum) {
            prop_assert!(slot.duration_minutes >= i64::from(minimum));
            prop_assert_eq!(slot.duration_minutes, (slot.end - slot.start).num_minutes());
        }
    }

    #[test]
    fn slots_are_ordered_disjoint_and_inside_window(
        raw in arb_busy_list(),
        minimum in arb_minimum(),
    ) {
        let slots = scan(&raw, minimum);
        for slot in &slots {
            prop_assert!(slot.start < slot.end);
            prop_assert!(slot.start >= minute(DAY_START_MIN));
            prop_assert!(slot.end <= minute(DAY_END_MIN));
        }
        for pair in slots.windows(2) {
            prop_assert!(pair[0].end <= pair[1].start, "slots overlap: {:?}", pair);
        }
    }

    #[test]
    fn slots_never_overlap_busy_time(raw in arb_busy_list(), minimum in arb_minimum()) {
        let slots = scan(&raw, minimum);
        for period in to_periods(&raw).iter().filter(|p| p.start() < p.end()) {
            for slot in &slots {
                prop_assert!(
                    slot.end <= period.start() || period.end() <= slot.start,
                    "slot {:?} overlaps busy {}",
                    slot,
                    period.range()
                );
            }
        }
    }

    #[test]
    fn scanning_is_idempotent(raw in arb_busy_list(), minimum in arb_minimum()) {
        prop_assert_eq!(scan(&raw, minimum), scan(&raw, minimum));
    }

    #[test]
    fn input_order_does_not_matter(raw in arb_busy_list(), minimum in arb_minimum()) {
        let mut reversed = raw.clone();
        reversed.reverse();

        let request = AvailabilityRequest {
            range: DateRange::new(monday(), monday()).unwrap(),
            hours: hours(),
            minimum_slot_minutes: minimum,
        };
        let forward = find_availability(&request, to_periods(&raw));
        let backward = find_availability(&request, to_periods(&reversed));
        prop_assert_eq!(forward, backward);
    }
}
