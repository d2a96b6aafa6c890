//! Filter types for querying appointments.

use jiff::civil::Date;

use super::AppointmentStatus;
use crate::{
    error::{Result, SchedulerError},
    params::{self, non_blank, parse_date},
};

/// Page size used when none is requested.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Filter and pagination options for listing appointments.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub employee_id: Option<u64>,

    /// Inclusive date range
    pub date_from: Option<Date>,
    pub date_to: Option<Date>,

    /// Case-insensitive partial match on the client name
    pub client_name: Option<String>,

    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl Default for AppointmentFilter {
    fn default() -> Self {
        Self {
            status: None,
            employee_id: None,
            date_from: None,
            date_to: None,
            client_name: None,
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl AppointmentFilter {
    /// Number of rows to skip for the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    /// Restricts the listing to one employee.
    pub fn for_employee(mut self, employee_id: Option<u64>) -> Self {
        self.employee_id = employee_id;
        self
    }
}

impl TryFrom<&params::ListAppointments> for AppointmentFilter {
    type Error = SchedulerError;

    /// Validates listing parameters.
    ///
    /// A page of 0, a limit of 0 or a reversed date range is rejected; a limit
    /// above [`MAX_PAGE_LIMIT`] is clamped.
    fn try_from(params: &params::ListAppointments) -> Result<Self> {
        let status = params
            .status
            .as_deref()
            .map(|s| {
                s.parse::<AppointmentStatus>()
                    .map_err(|reason| SchedulerError::invalid_input("status").with_reason(reason))
            })
            .transpose()?;
        let date_from = params
            .date_from
            .as_deref()
            .map(|d| parse_date("date_from", d))
            .transpose()?;
        let date_to = params
            .date_to
            .as_deref()
            .map(|d| parse_date("date_to", d))
            .transpose()?;

        if let (Some(from), Some(to)) = (date_from, date_to) {
            if from > to {
                return Err(SchedulerError::invalid_input("date_to")
                    .with_reason("End of range must not be before its start"));
            }
        }

        let page = params.page.unwrap_or(1);
        if page == 0 {
            return Err(SchedulerError::invalid_input("page").with_reason("Pages start at 1"));
        }
        let limit = params.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        if limit == 0 {
            return Err(
                SchedulerError::invalid_input("limit").with_reason("Limit must be at least 1")
            );
        }

        Ok(Self {
            status,
            employee_id: params.employee_id,
            date_from,
            date_to,
            client_name: non_blank(params.client_name.as_deref()),
            page,
            limit: limit.min(MAX_PAGE_LIMIT),
        })
    }
}
