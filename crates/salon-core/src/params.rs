//! Parameter structures for scheduler operations
//!
//! Framework-free request shapes shared by every interface (CLI, MCP).
//! Interface layers wrap these in their own types carrying clap or schemars
//! derives and convert into them with `From`.
//!
//! Fields arrive as loosely typed values (dates and times as strings, status
//! as free text). They are checked and converted into the typed requests in
//! [`crate::models`] via `TryFrom`, so validation errors surface before any
//! database work starts.
//!
//! ```ignore
//! // In the CLI
//! #[derive(Args)]
//! pub struct BookArgs { /* clap attributes */ }
//!
//! impl From<BookArgs> for CreateAppointment { /* field copy */ }
//!
//! // In the MCP server
//! #[derive(Deserialize, JsonSchema)]
//! #[serde(transparent)]
//! struct BookRequest(salon_core::params::CreateAppointment);
//! ```

use jiff::civil::{Date, Time};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulerError};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for booking a new appointment.
///
/// Either `client_id` or both `client_name` and `client_phone` must be
/// given. Duration, price and commission are resolved from the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateAppointment {
    /// Employee performing the service
    pub employee_id: u64,
    /// Service to book
    pub service_id: u64,
    /// Day of the appointment (YYYY-MM-DD)
    pub date: String,
    /// Start time (HH:MM or HH:MM:SS)
    pub start_time: String,
    /// Existing client ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    /// Walk-in client name, used when no client ID is given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// Walk-in client phone, looked up before a new client is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    /// Free-text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Initial status (defaults to 'scheduled')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Parameters for updating an existing appointment.
///
/// Unspecified fields keep their current values. Changing the service or
/// the employee re-resolves duration, price and commission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateAppointment {
    /// Appointment ID to update (required)
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<u64>,
    /// New day (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// New start time (HH:MM or HH:MM:SS)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    /// New status ('scheduled', 'completed', 'canceled' or a custom value)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// New notes; an empty string clears them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Parameters for changing the status of an appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct TransitionStatus {
    /// Appointment ID
    pub id: u64,
    /// Target status ('scheduled', 'completed', 'canceled' or a custom value)
    pub status: String,
}

/// Parameters for the filtered, paginated appointment listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListAppointments {
    /// Only appointments with this status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Only appointments of this employee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
    /// First day of the range, inclusive (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Last day of the range, inclusive (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
    /// Case-insensitive substring of the client name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    /// 1-based page number (default 1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Page size (default 20, at most 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Parameters for listing the appointments of one day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AppointmentsByDate {
    /// Day to list (YYYY-MM-DD)
    pub date: String,
}

/// Parameters for listing the appointments of one employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AppointmentsByEmployee {
    pub employee_id: u64,
    /// Restrict to one day (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// Parameters for upcoming appointment queries.
///
/// Used both for "next N" lookups (`limit`) and for offset/limit windows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Upcoming {
    /// Only appointments of this employee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
    /// Number of appointments to return (default 10, at most 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// Number of appointments to skip (default 0)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// Parameters for computing bookable start times.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct AvailableSlots {
    pub employee_id: u64,
    /// Day to inspect (YYYY-MM-DD)
    pub date: String,
    /// Service whose duration must fit; defaults to the grid granularity
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_id: Option<u64>,
    /// Appointment being edited, ignored when checking overlaps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_appointment_id: Option<u64>,
}

/// Parameters for bulk slot grid generation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct GenerateSlots {
    /// Employees to provision
    pub employee_ids: Vec<u64>,
    /// First day, inclusive (YYYY-MM-DD)
    pub start_date: String,
    /// Last day, inclusive (YYYY-MM-DD)
    pub end_date: String,
    /// First cell start time (HH:MM)
    pub day_start: String,
    /// No cell may end after this time (HH:MM)
    pub day_end: String,
    /// Cell length in minutes
    pub interval_minutes: u32,
}

/// Parameters for inspecting persisted slot cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListSlots {
    pub employee_id: u64,
    /// Day to inspect (YYYY-MM-DD)
    pub date: String,
}

/// Parameters for adding an employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateEmployee {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Parameters for adding a service to the catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateService {
    pub name: String,
    /// Default duration in minutes (greater than zero)
    pub duration_minutes: u32,
    /// Recommended price (zero or more, rounded to the cent)
    pub recommended_price: f64,
}

/// Parameters for setting an employee's commission rate on a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetSpecialty {
    pub employee_id: u64,
    pub service_id: u64,
    /// Percentage between 0 and 100
    pub commission_rate: f64,
}

/// Parameters for registering a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateClient {
    pub name: String,
    pub phone: String,
}

/// Parameters for looking up a client by phone number.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FindClient {
    pub phone: String,
}

/// Parses a calendar day in `YYYY-MM-DD` form.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<Date> {
    value.trim().parse::<Date>().map_err(|e| {
        SchedulerError::invalid_input(field)
            .with_reason(format!("Invalid date '{value}', expected YYYY-MM-DD: {e}"))
    })
}

/// Parses a time of day in `HH:MM:SS` or `HH:MM` form.
///
/// Scheduling works at minute granularity, so a non-zero seconds part is
/// rejected rather than truncated.
pub(crate) fn parse_time(field: &str, value: &str) -> Result<Time> {
    let value = value.trim();
    let time = Time::strptime("%H:%M:%S", value)
        .or_else(|_| Time::strptime("%H:%M", value))
        .map_err(|_| {
            SchedulerError::invalid_input(field)
                .with_reason(format!("Invalid time '{value}', expected HH:MM"))
        })?;
    if time.second() != 0 || time.subsec_nanosecond() != 0 {
        return Err(SchedulerError::invalid_input(field)
            .with_reason(format!("Time '{value}' must fall on a whole minute")));
    }
    Ok(time)
}

/// Trims a free-text value, mapping blank input to `None`.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Rejects blank required text fields.
pub(crate) fn required_text(field: &str, value: &str) -> Result<String> {
    non_blank(Some(value))
        .ok_or_else(|| SchedulerError::invalid_input(field).with_reason("Must not be empty"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("date", "2026-03-14").unwrap(),
            jiff::civil::date(2026, 3, 14)
        );

        match parse_date("date", "14/03/2026").unwrap_err() {
            SchedulerError::InvalidInput { field, reason } => {
                assert_eq!(field, "date");
                assert!(reason.contains("YYYY-MM-DD"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_time_accepts_both_forms() {
        let expected = jiff::civil::time(9, 30, 0, 0);
        assert_eq!(parse_time("start_time", "09:30").unwrap(), expected);
        assert_eq!(parse_time("start_time", "09:30:00").unwrap(), expected);
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert!(parse_time("start_time", "25:00").is_err());
        assert!(parse_time("start_time", "nine").is_err());
        assert!(parse_time("start_time", "").is_err());
    }

    #[test]
    fn test_parse_time_rejects_partial_minutes() {
        match parse_time("start_time", "09:00:30").unwrap_err() {
            SchedulerError::InvalidInput { field, reason } => {
                assert_eq!(field, "start_time");
                assert!(reason.contains("whole minute"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", "  Ana ").unwrap(), "Ana");
        assert!(required_text("name", "   ").is_err());
        assert_eq!(non_blank(Some("")), None);
        assert_eq!(non_blank(None), None);
    }
}
