//! Slot occupancy

use mitra_core::{ClockTime, ScheduleItem};

/// Whether some item already starts at `time`.
pub fn is_occupied(items: &[ScheduleItem], time: ClockTime) -> bool {
    items.iter().any(|item| item.time == time)
}

/// First probe at or after `from` that no item starts at. Probes are tried
/// in list order.
pub fn first_free_slot(
    items: &[ScheduleItem],
    probes: &[ClockTime],
    from: ClockTime,
) -> Option<ClockTime> {
    probes
        .iter()
        .copied()
        .filter(|probe| *probe >= from)
        .find(|probe| !is_occupied(items, *probe))
}
