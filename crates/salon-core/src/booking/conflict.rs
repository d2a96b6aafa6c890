//! Double-booking detection.

use super::Interval;

/// The interval held by one existing non-canceled appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedInterval {
    pub appointment_id: u64,
    pub interval: Interval,
}

/// Returns the first existing appointment whose interval overlaps the
/// candidate, skipping `exclude` (the appointment being edited).
///
/// `existing` must only hold non-canceled appointments of one employee on
/// one day.
pub fn find_conflict(
    candidate: &Interval,
    existing: &[BookedInterval],
    exclude: Option<u64>,
) -> Option<u64> {
    existing
        .iter()
        .filter(|booked| Some(booked.appointment_id) != exclude)
        .find(|booked| booked.interval.overlaps(candidate))
        .map(|booked| booked.appointment_id)
}

/// True when the candidate overlaps any existing interval.
pub fn has_conflict(candidate: &Interval, existing: &[BookedInterval], exclude: Option<u64>) -> bool {
    find_conflict(candidate, existing, exclude).is_some()
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use super::*;

    fn booked(appointment_id: u64, hour: i8, minute: i8, duration: u32) -> BookedInterval {
        BookedInterval {
            appointment_id,
            interval: Interval::starting_at(time(hour, minute, 0, 0), duration).unwrap(),
        }
    }

    fn candidate(hour: i8, minute: i8, duration: u32) -> Interval {
        Interval::starting_at(time(hour, minute, 0, 0), duration).unwrap()
    }

    #[test]
    fn test_overlapping_booking_is_rejected() {
        let existing = [booked(7, 9, 15, 30)];
        assert_eq!(find_conflict(&candidate(9, 0, 30), &existing, None), Some(7));
    }

    #[test]
    fn test_touching_booking_is_accepted() {
        let existing = [booked(7, 9, 15, 30)];
        assert!(!has_conflict(&candidate(8, 30, 30), &existing, None));
        assert!(!has_conflict(&candidate(8, 45, 30), &existing, None));
        assert!(!has_conflict(&candidate(9, 45, 15), &existing, None));
    }

    #[test]
    fn test_own_interval_is_excluded() {
        let existing = [booked(3, 10, 0, 60), booked(4, 11, 0, 30)];
        assert!(!has_conflict(&candidate(10, 0, 60), &existing, Some(3)));
        assert_eq!(find_conflict(&candidate(10, 30, 60), &existing, Some(3)), Some(4));
    }

    #[test]
    fn test_empty_day_has_no_conflict() {
        assert_eq!(find_conflict(&candidate(12, 0, 45), &[], None), None);
    }

    #[test]
    fn test_long_candidate_spanning_several_bookings() {
        let existing = [booked(1, 9, 0, 30), booked(2, 13, 0, 30)];
        assert_eq!(find_conflict(&candidate(8, 0, 360), &existing, None), Some(1));
        assert_eq!(find_conflict(&candidate(8, 0, 360), &existing, Some(1)), Some(2));
    }
}
