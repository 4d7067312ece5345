//! Free-slot scanning for a single working day.
//!
//! A single left-to-right pass over busy periods sorted by start. A cursor
//! marks the earliest instant not yet known to be busy; it only ever moves
//! forward, so overlapping and adjacent busy periods merge implicitly.

use crate::types::{BusyPeriod, FreeSlot};
use crate::window::WorkingDay;

/// Find the free slots of `day` given its busy periods.
///
/// `busy` must be sorted ascending by start. Gaps shorter than
/// `minimum_slot_minutes` are discarded. Zero-length busy periods block no
/// time and are ignored. Periods starting at or after `day_end` end the walk;
/// one that runs past `day_end` suppresses the trailing gap.
///
/// A degenerate window (`day_start >= day_end`) yields no slots.
pub fn scan_day(
    day: &WorkingDay,
    busy: &[BusyPeriod],
    minimum_slot_minutes: u32,
) -> Vec<FreeSlot> {
    if day.day_start >= day.day_end {
        return Vec::new();
    }

    let minimum = i64::from(minimum_slot_minutes);
    let mut slots = Vec::new();
    let mut emit = |slot: FreeSlot| {
        if slot.duration_minutes >= minimum {
            slots.push(slot);
        }
    };

    let mut free_start = day.day_start;

    for period in busy {
        if period.start() >= day.day_end {
            break;
        }
        // Already covered by an earlier period, or blocks nothing
        if period.end() <= free_start || period.start() == period.end() {
            continue;
        }

        if period.start() > free_start {
            emit(FreeSlot::new(free_start, period.start()));
        }

        free_start = period.end();
    }

    if free_start < day.day_end {
        emit(FreeSlot::new(free_start, day.day_end));
    }

    slots
}
