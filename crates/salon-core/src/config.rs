//! Business configuration shared by the booking engine.

use jiff::civil::{time, Time};
use serde::{Deserialize, Serialize};

use crate::{
    booking::{minute_of_day, MINUTES_PER_DAY},
    error::{Result, SchedulerError},
    params::parse_time,
};

/// Operating window and slot granularity used for availability display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    opening: Time,
    closing: Time,
    slot_minutes: u32,
}

impl BusinessHours {
    /// Creates validated business hours.
    ///
    /// # Errors
    ///
    /// Returns `SchedulerError::Configuration` when opening is not before
    /// closing or the granularity is zero or longer than a day.
    pub fn new(opening: Time, closing: Time, slot_minutes: u32) -> Result<Self> {
        if opening >= closing {
            return Err(SchedulerError::Configuration {
                message: format!("Opening time {opening} must be before closing time {closing}"),
            });
        }
        if slot_minutes == 0 || slot_minutes > MINUTES_PER_DAY {
            return Err(SchedulerError::Configuration {
                message: format!("Slot length must be between 1 and {MINUTES_PER_DAY} minutes"),
            });
        }
        Ok(Self {
            opening,
            closing,
            slot_minutes,
        })
    }

    /// Parses `HH:MM` opening and closing times, as given on a command line.
    pub fn parse(opening: &str, closing: &str, slot_minutes: u32) -> Result<Self> {
        let opening = parse_time("opening", opening)?;
        let closing = parse_time("closing", closing)?;
        Self::new(opening, closing, slot_minutes)
    }

    pub fn opening(&self) -> Time {
        self.opening
    }

    pub fn closing(&self) -> Time {
        self.closing
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    /// Opening time as minutes after midnight.
    pub fn opening_minute(&self) -> u32 {
        minute_of_day(self.opening)
    }

    /// Closing time as minutes after midnight.
    pub fn closing_minute(&self) -> u32 {
        minute_of_day(self.closing)
    }
}

impl Default for BusinessHours {
    /// 08:00 to 18:00 in 30-minute slots.
    fn default() -> Self {
        Self {
            opening: time(8, 0, 0, 0),
            closing: time(18, 0, 0, 0),
            slot_minutes: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hours() {
        let hours = BusinessHours::default();
        assert_eq!(hours.opening_minute(), 480);
        assert_eq!(hours.closing_minute(), 1080);
        assert_eq!(hours.slot_minutes(), 30);
    }

    #[test]
    fn test_rejects_inverted_window_and_zero_slots() {
        assert!(BusinessHours::new(time(18, 0, 0, 0), time(8, 0, 0, 0), 30).is_err());
        assert!(BusinessHours::new(time(8, 0, 0, 0), time(8, 0, 0, 0), 30).is_err());
        assert!(BusinessHours::new(time(8, 0, 0, 0), time(18, 0, 0, 0), 0).is_err());
        assert!(BusinessHours::new(time(9, 0, 0, 0), time(17, 0, 0, 0), 15).is_ok());
    }

    #[test]
    fn test_parse_from_text() {
        let hours = BusinessHours::parse("09:00", "17:30", 15).unwrap();
        assert_eq!(hours.opening(), time(9, 0, 0, 0));
        assert_eq!(hours.closing_minute(), 17 * 60 + 30);

        let err = BusinessHours::parse("9am", "17:00", 30).unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidInput { ref field, .. } if field == "opening"));
    }
}
