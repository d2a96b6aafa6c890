//! Appointment status enumeration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an appointment.
///
/// Only `scheduled`, `completed` and `canceled` carry behavior. Any other
/// non-empty value is stored verbatim as [`AppointmentStatus::Other`] and
/// treated as an active (non-canceled) appointment without side effects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    /// Booked and waiting to happen
    #[default]
    Scheduled,

    /// Service was delivered
    Completed,

    /// Booking was called off; does not block the schedule
    Canceled,

    /// Any other status stored by an external collaborator
    Other(String),
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "" => Err("Status must not be empty".to_string()),
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "canceled" | "cancelled" => Ok(AppointmentStatus::Canceled),
            _ => Ok(AppointmentStatus::Other(normalized)),
        }
    }
}

impl From<String> for AppointmentStatus {
    fn from(value: String) -> Self {
        value
            .parse()
            .unwrap_or(AppointmentStatus::Other(value))
    }
}

impl From<AppointmentStatus> for String {
    fn from(value: AppointmentStatus) -> Self {
        value.as_str().to_string()
    }
}

impl AppointmentStatus {
    /// Database string representation.
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Canceled => "canceled",
            AppointmentStatus::Other(value) => value,
        }
    }

    /// Canceled appointments neither block the schedule nor hold a slot.
    pub fn is_canceled(&self) -> bool {
        matches!(self, AppointmentStatus::Canceled)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, AppointmentStatus::Completed)
    }

    /// Get status with a consistent icon for display.
    pub fn with_icon(&self) -> String {
        match self {
            AppointmentStatus::Scheduled => "○ Scheduled".to_string(),
            AppointmentStatus::Completed => "✓ Completed".to_string(),
            AppointmentStatus::Canceled => "✗ Canceled".to_string(),
            AppointmentStatus::Other(value) => format!("• {value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        assert_eq!("scheduled".parse(), Ok(AppointmentStatus::Scheduled));
        assert_eq!(" Completed ".parse(), Ok(AppointmentStatus::Completed));
        assert_eq!("cancelled".parse(), Ok(AppointmentStatus::Canceled));
        assert_eq!("canceled".parse(), Ok(AppointmentStatus::Canceled));
    }

    #[test]
    fn test_parse_custom_and_empty() {
        assert_eq!(
            "no_show".parse(),
            Ok(AppointmentStatus::Other("no_show".to_string()))
        );
        assert!("   ".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_plain_strings() {
        let json = serde_json::to_string(&AppointmentStatus::Canceled).unwrap();
        assert_eq!(json, "\"canceled\"");
        let custom: AppointmentStatus = serde_json::from_str("\"confirmed\"").unwrap();
        assert_eq!(custom, AppointmentStatus::Other("confirmed".to_string()));
        assert!(!custom.is_canceled());
    }
}
