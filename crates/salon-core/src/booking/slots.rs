//! Slot grid layout and on-the-fly availability.

use jiff::civil::Time;

use super::{conflict::has_conflict, minute_of_day, BookedInterval, Interval};
use crate::{config::BusinessHours, models::AvailableSlot};

/// Lays out intervals of `length` minutes every `step` minutes from
/// `window_start`, keeping only those that end by `window_end`.
pub fn layout(window_start: u32, window_end: u32, step: u32, length: u32) -> Vec<Interval> {
    if step == 0 {
        return Vec::new();
    }
    (window_start..window_end)
        .step_by(step as usize)
        .filter_map(|start| {
            let end = start.checked_add(length)?;
            (end <= window_end).then(|| Interval::new(start, end)).flatten()
        })
        .collect()
}

/// Cells of a persisted slot grid for one employee and day.
///
/// No cell ends after `day_end`.
pub fn grid_cells(day_start: Time, day_end: Time, interval_minutes: u32) -> Vec<Interval> {
    layout(
        minute_of_day(day_start),
        minute_of_day(day_end),
        interval_minutes,
        interval_minutes,
    )
}

/// Start times on the business grid at which `duration_minutes` fits before
/// closing without overlapping any booked interval.
pub fn available_slots(
    hours: &BusinessHours,
    duration_minutes: u32,
    booked: &[BookedInterval],
    exclude: Option<u64>,
) -> Vec<AvailableSlot> {
    layout(
        hours.opening_minute(),
        hours.closing_minute(),
        hours.slot_minutes(),
        duration_minutes,
    )
    .into_iter()
    .filter(|candidate| !has_conflict(candidate, booked, exclude))
    .map(|candidate| AvailableSlot {
        start_time: candidate.start_time(),
        end_time: candidate.end_time(),
    })
    .collect()
}
