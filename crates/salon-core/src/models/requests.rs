//! Validated request types for booking mutations.

use jiff::civil::{Date, Time};

use super::{Appointment, AppointmentStatus};
use crate::{
    error::{Result, SchedulerError},
    params::{self, non_blank, parse_date, parse_time, required_text},
};

/// Longest range a single slot generation run may cover.
pub const MAX_GENERATION_DAYS: i32 = 366;

/// How a booking identifies its client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientRef {
    /// A client that must already exist
    Existing(u64),
    /// A walk-in, matched by phone or created on the fly
    WalkIn { name: String, phone: String },
}

/// A validated booking request.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub employee_id: u64,
    pub service_id: u64,
    pub date: Date,
    pub start_time: Time,
    pub client: ClientRef,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

impl TryFrom<params::CreateAppointment> for NewAppointment {
    type Error = SchedulerError;

    fn try_from(params: params::CreateAppointment) -> Result<Self> {
        let date = parse_date("date", &params.date)?;
        let start_time = parse_time("start_time", &params.start_time)?;
        let status = parse_status(params.status.as_deref())?.unwrap_or_default();

        let client = match params.client_id {
            Some(id) => ClientRef::Existing(id),
            None => {
                let name = non_blank(params.client_name.as_deref());
                let phone = non_blank(params.client_phone.as_deref());
                match (name, phone) {
                    (Some(name), Some(phone)) => ClientRef::WalkIn { name, phone },
                    _ => {
                        return Err(SchedulerError::invalid_input("client").with_reason(
                            "Either client_id or both client_name and client_phone are required",
                        ))
                    }
                }
            }
        };

        Ok(Self {
            employee_id: params.employee_id,
            service_id: params.service_id,
            date,
            start_time,
            client,
            notes: non_blank(params.notes.as_deref()),
            status,
        })
    }
}

/// Named optional fields to merge over an existing appointment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentPatch {
    pub employee_id: Option<u64>,
    pub service_id: Option<u64>,
    pub date: Option<Date>,
    pub start_time: Option<Time>,
    pub client_id: Option<u64>,
    pub status: Option<AppointmentStatus>,
    /// `Some(None)` clears the notes
    pub notes: Option<Option<String>>,
}

/// The booking-relevant fields of an appointment after a patch is merged.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedAppointment {
    pub client_id: u64,
    pub employee_id: u64,
    pub service_id: u64,
    pub date: Date,
    pub start_time: Time,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

impl AppointmentPatch {
    /// True when the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Uses each patched value, or keeps the current one.
    pub fn merge(&self, current: &Appointment) -> MergedAppointment {
        MergedAppointment {
            client_id: self.client_id.unwrap_or(current.client_id),
            employee_id: self.employee_id.unwrap_or(current.employee_id),
            service_id: self.service_id.unwrap_or(current.service_id),
            date: self.date.unwrap_or(current.date),
            start_time: self.start_time.unwrap_or(current.start_time),
            status: self
                .status
                .clone()
                .unwrap_or_else(|| current.status.clone()),
            notes: match &self.notes {
                Some(notes) => notes.clone(),
                None => current.notes.clone(),
            },
        }
    }
}

impl TryFrom<params::UpdateAppointment> for AppointmentPatch {
    type Error = SchedulerError;

    fn try_from(params: params::UpdateAppointment) -> Result<Self> {
        Ok(Self {
            employee_id: params.employee_id,
            service_id: params.service_id,
            date: params
                .date
                .as_deref()
                .map(|d| parse_date("date", d))
                .transpose()?,
            start_time: params
                .start_time
                .as_deref()
                .map(|t| parse_time("start_time", t))
                .transpose()?,
            client_id: params.client_id,
            status: parse_status(params.status.as_deref())?,
            notes: params.notes.as_deref().map(|n| non_blank(Some(n))),
        })
    }
}

/// A validated status change.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub id: u64,
    pub status: AppointmentStatus,
}

impl TryFrom<params::TransitionStatus> for StatusChange {
    type Error = SchedulerError;

    fn try_from(params: params::TransitionStatus) -> Result<Self> {
        let status = parse_status(Some(&params.status))?.ok_or_else(|| {
            SchedulerError::invalid_input("status").with_reason("Status is required")
        })?;
        Ok(Self {
            id: params.id,
            status,
        })
    }
}

/// A validated slot grid generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotGenerationRequest {
    pub employee_ids: Vec<u64>,
    pub start_date: Date,
    pub end_date: Date,
    pub day_start: Time,
    pub day_end: Time,
    pub interval_minutes: u32,
}

impl SlotGenerationRequest {
    /// Every calendar day in the inclusive range.
    pub fn days(&self) -> Vec<Date> {
        self.start_date
            .series(jiff::Span::new().days(1))
            .take_while(|day| *day <= self.end_date)
            .collect()
    }
}

impl TryFrom<params::GenerateSlots> for SlotGenerationRequest {
    type Error = SchedulerError;

    fn try_from(params: params::GenerateSlots) -> Result<Self> {
        if params.employee_ids.is_empty() {
            return Err(SchedulerError::invalid_input("employee_ids")
                .with_reason("At least one employee is required"));
        }

        let start_date = parse_date("start_date", &params.start_date)?;
        let end_date = parse_date("end_date", &params.end_date)?;
        if start_date > end_date {
            return Err(SchedulerError::invalid_input("end_date")
                .with_reason("End date must not be before start date"));
        }
        let span_days = start_date
            .until(end_date)
            .map_err(|e| SchedulerError::invalid_input("end_date").with_reason(e.to_string()))?
            .get_days();
        if span_days >= MAX_GENERATION_DAYS {
            return Err(SchedulerError::invalid_input("end_date").with_reason(format!(
                "Range must cover at most {MAX_GENERATION_DAYS} days"
            )));
        }

        let day_start = parse_time("day_start", &params.day_start)?;
        let day_end = parse_time("day_end", &params.day_end)?;
        if day_start >= day_end {
            return Err(SchedulerError::invalid_input("day_end")
                .with_reason("Day end must be after day start"));
        }
        if params.interval_minutes == 0 {
            return Err(SchedulerError::invalid_input("interval_minutes")
                .with_reason("Interval must be greater than zero"));
        }

        let mut employee_ids = params.employee_ids;
        employee_ids.sort_unstable();
        employee_ids.dedup();

        Ok(Self {
            employee_ids,
            start_date,
            end_date,
            day_start,
            day_end,
            interval_minutes: params.interval_minutes,
        })
    }
}

/// A validated new service.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub duration_minutes: u32,
    pub recommended_price: super::Money,
}

impl TryFrom<params::CreateService> for NewService {
    type Error = SchedulerError;

    fn try_from(params: params::CreateService) -> Result<Self> {
        let name = required_text("name", &params.name)?;
        if params.duration_minutes == 0 {
            return Err(SchedulerError::invalid_input("duration_minutes")
                .with_reason("Duration must be greater than zero"));
        }
        let recommended_price = super::Money::from_decimal(params.recommended_price)
            .filter(|price| !price.is_negative())
            .ok_or_else(|| {
                SchedulerError::invalid_input("recommended_price")
                    .with_reason("Price must be a number greater than or equal to zero")
            })?;

        Ok(Self {
            name,
            duration_minutes: params.duration_minutes,
            recommended_price,
        })
    }
}

/// Validates a commission percentage.
pub fn validate_commission_rate(rate: f64) -> Result<f64> {
    if rate.is_finite() && (0.0..=100.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(SchedulerError::invalid_input("commission_rate")
            .with_reason("Commission rate must be between 0 and 100"))
    }
}

fn parse_status(value: Option<&str>) -> Result<Option<AppointmentStatus>> {
    value
        .map(|s| {
            s.parse::<AppointmentStatus>()
                .map_err(|reason| SchedulerError::invalid_input("status").with_reason(reason))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use jiff::civil::{date, time};

    use super::*;

    fn booking_params() -> params::CreateAppointment {
        params::CreateAppointment {
            employee_id: 1,
            service_id: 2,
            date: "2026-03-14".to_string(),
            start_time: "09:00".to_string(),
            client_name: Some("Ana".to_string()),
            client_phone: Some("555-0100".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_appointment_from_walk_in() {
        let request = NewAppointment::try_from(booking_params()).unwrap();
        assert_eq!(request.date, date(2026, 3, 14));
        assert_eq!(request.start_time, time(9, 0, 0, 0));
        assert_eq!(request.status, AppointmentStatus::Scheduled);
        assert_eq!(
            request.client,
            ClientRef::WalkIn {
                name: "Ana".to_string(),
                phone: "555-0100".to_string()
            }
        );
    }

    #[test]
    fn test_new_appointment_requires_client_identification() {
        let mut params = booking_params();
        params.client_phone = Some("  ".to_string());

        match NewAppointment::try_from(params).unwrap_err() {
            SchedulerError::InvalidInput { field, .. } => assert_eq!(field, "client"),
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_client_id_wins_over_walk_in_fields() {
        let mut params = booking_params();
        params.client_id = Some(7);
        let request = NewAppointment::try_from(params).unwrap();
        assert_eq!(request.client, ClientRef::Existing(7));
    }

    #[test]
    fn test_patch_merge_keeps_unspecified_fields() {
        let current = crate::models::tests::sample_appointment();
        let patch = AppointmentPatch::try_from(params::UpdateAppointment {
            id: current.id,
            start_time: Some("11:15".to_string()),
            notes: Some(String::new()),
            ..Default::default()
        })
        .unwrap();

        let merged = patch.merge(&current);
        assert_eq!(merged.start_time, time(11, 15, 0, 0));
        assert_eq!(merged.date, current.date);
        assert_eq!(merged.employee_id, current.employee_id);
        assert_eq!(merged.service_id, current.service_id);
        assert_eq!(merged.status, current.status);
        assert_eq!(merged.notes, None);
    }

    #[test]
    fn test_empty_patch() {
        let patch = AppointmentPatch::try_from(params::UpdateAppointment {
            id: 1,
            ..Default::default()
        })
        .unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn test_status_change_rejects_blank_status() {
        let err = StatusChange::try_from(params::TransitionStatus {
            id: 1,
            status: " ".to_string(),
        })
        .unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidInput { ref field, .. } if field == "status"));
    }

    #[test]
    fn test_slot_generation_validation() {
        let valid = params::GenerateSlots {
            employee_ids: vec![2, 1, 2],
            start_date: "2026-03-14".to_string(),
            end_date: "2026-03-16".to_string(),
            day_start: "08:00".to_string(),
            day_end: "12:00".to_string(),
            interval_minutes: 30,
        };
        let request = SlotGenerationRequest::try_from(valid.clone()).unwrap();
        assert_eq!(request.employee_ids, vec![1, 2]);
        assert_eq!(request.days().len(), 3);

        let mut reversed = valid.clone();
        reversed.end_date = "2026-03-13".to_string();
        assert!(SlotGenerationRequest::try_from(reversed).is_err());

        let mut too_long = valid.clone();
        too_long.end_date = "2027-03-15".to_string();
        assert!(SlotGenerationRequest::try_from(too_long).is_err());

        let mut empty_window = valid.clone();
        empty_window.day_end = "08:00".to_string();
        assert!(SlotGenerationRequest::try_from(empty_window).is_err());

        let mut no_employees = valid;
        no_employees.employee_ids.clear();
        assert!(SlotGenerationRequest::try_from(no_employees).is_err());
    }

    #[test]
    fn test_new_service_validation() {
        let service = NewService::try_from(params::CreateService {
            name: "Cut".to_string(),
            duration_minutes: 45,
            recommended_price: 80.0,
        })
        .unwrap();
        assert_eq!(service.recommended_price.to_string(), "80.00");

        assert!(NewService::try_from(params::CreateService {
            name: "Cut".to_string(),
            duration_minutes: 0,
            recommended_price: 80.0,
        })
        .is_err());
        assert!(NewService::try_from(params::CreateService {
            name: "Cut".to_string(),
            duration_minutes: 30,
            recommended_price: -1.0,
        })
        .is_err());
    }

    #[test]
    fn test_commission_rate_bounds() {
        assert_eq!(validate_commission_rate(40.0).unwrap(), 40.0);
        assert!(validate_commission_rate(100.5).is_err());
        assert!(validate_commission_rate(f64::NAN).is_err());
    }
}
