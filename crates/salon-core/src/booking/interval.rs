//! Half-open time-of-day intervals in minutes.

use std::fmt;

use jiff::civil::Time;

use crate::error::{Result, SchedulerError};

/// Number of minutes in a calendar day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes after midnight, ignoring seconds.
pub fn minute_of_day(t: Time) -> u32 {
    t.hour() as u32 * 60 + t.minute() as u32
}

/// Converts minutes after midnight back to a time of day.
///
/// Midnight at the end of the day has no `Time` representation and maps to
/// the last representable instant.
pub fn time_of_minute(minute: u32) -> Time {
    Time::new((minute / 60) as i8, (minute % 60) as i8, 0, 0).unwrap_or(Time::MAX)
}

/// A half-open interval `[start, end)` of minutes within one day.
///
/// Back-to-back intervals touch without overlapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    start: u32,
    end: u32,
}

impl Interval {
    /// Creates an interval, returning `None` unless `start < end <= 24:00`.
    pub fn new(start: u32, end: u32) -> Option<Self> {
        (start < end && end <= MINUTES_PER_DAY).then_some(Self { start, end })
    }

    /// The interval a booking of `duration_minutes` starting at `start`
    /// occupies.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the duration is zero or the booking would run
    /// past midnight.
    pub fn starting_at(start: Time, duration_minutes: u32) -> Result<Self> {
        if duration_minutes == 0 {
            return Err(SchedulerError::invalid_input("duration_minutes")
                .with_reason("Duration must be greater than zero"));
        }
        let start = minute_of_day(start);
        start
            .checked_add(duration_minutes)
            .and_then(|end| Self::new(start, end))
            .ok_or_else(|| {
                SchedulerError::invalid_input("start_time")
                    .with_reason("Appointment would run past midnight")
            })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn duration(&self) -> u32 {
        self.end - self.start
    }

    pub fn start_time(&self) -> Time {
        time_of_minute(self.start)
    }

    pub fn end_time(&self) -> Time {
        time_of_minute(self.end)
    }

    /// Two intervals overlap unless one ends at or before the other begins.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use super::*;

    fn span(start: u32, end: u32) -> Interval {
        Interval::new(start, end).unwrap()
    }

    #[test]
    fn test_touching_intervals_do_not_overlap() {
        let morning = span(510, 540);
        let next = span(540, 570);
        assert!(!morning.overlaps(&next));
        assert!(!next.overlaps(&morning));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = span(540, 570);
        let b = span(555, 585);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));

        let inner = span(560, 565);
        assert!(a.overlaps(&inner));
        assert!(inner.overlaps(&a));
    }

    #[test]
    fn test_starting_at() {
        let interval = Interval::starting_at(time(9, 15, 0, 0), 30).unwrap();
        assert_eq!(interval, span(555, 585));
        assert_eq!(interval.end_time(), time(9, 45, 0, 0));
        assert_eq!(interval.to_string(), "09:15-09:45");

        let late = Interval::starting_at(time(23, 0, 0, 0), 60).unwrap();
        assert_eq!(late.to_string(), "23:00-24:00");
        assert!(Interval::starting_at(time(23, 30, 0, 0), 60).is_err());
        assert!(Interval::starting_at(time(9, 0, 0, 0), 0).is_err());
    }

    #[test]
    fn test_rejects_empty_intervals() {
        assert!(Interval::new(600, 600).is_none());
        assert!(Interval::new(601, 600).is_none());
        assert!(Interval::new(0, MINUTES_PER_DAY + 1).is_none());
    }
}
