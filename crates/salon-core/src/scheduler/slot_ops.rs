//! Slot grid operations for the Scheduler.

use log::debug;

use super::Scheduler;
use crate::{
    booking::available_slots,
    display::{AvailableSlots, SlotCells},
    error::{Result, SchedulerError},
    models::{SlotGenerationRequest, SlotGenerationSummary},
    params::{parse_date, AvailableSlots as AvailableSlotsParams, GenerateSlots, ListSlots},
};

impl Scheduler {
    /// Provisions slot cells for a set of employees over a date range.
    ///
    /// Re-running with the same parameters creates nothing new.
    pub async fn generate_slots(&self, params: &GenerateSlots) -> Result<SlotGenerationSummary> {
        let request = SlotGenerationRequest::try_from(params.clone())?;
        self.with_database(move |db| db.generate_slots(&request))
            .await
    }

    /// Persisted cells of one employee on one day.
    pub async fn list_slots(&self, params: &ListSlots) -> Result<SlotCells> {
        let employee_id = params.employee_id;
        let date = parse_date("date", &params.date)?;
        let cells = self
            .with_database(move |db| db.list_slots(employee_id, date))
            .await?;
        Ok(SlotCells(cells))
    }

    /// Start times within business hours where a booking of the service's
    /// duration fits without overlapping the employee's other bookings.
    ///
    /// Without a service the grid granularity is used as the duration.
    pub async fn available_slots(&self, params: &AvailableSlotsParams) -> Result<AvailableSlots> {
        let employee_id = params.employee_id;
        let date = parse_date("date", &params.date)?;
        let service_id = params.service_id;
        let exclude = params.exclude_appointment_id;
        let hours = self.hours;

        let slots = self
            .with_database(move |db| {
                if db.get_employee(employee_id)?.is_none() {
                    return Err(SchedulerError::EmployeeNotFound { id: employee_id });
                }
                let duration = match service_id {
                    Some(id) => {
                        db.get_service(id)?
                            .ok_or(SchedulerError::ServiceNotFound { id })?
                            .duration_minutes
                    }
                    None => hours.slot_minutes(),
                };
                let booked = db.booked_intervals(employee_id, date)?;
                debug!(
                    "Computing {duration}-minute availability for employee {employee_id} on {date} against {} booking(s)",
                    booked.len()
                );
                Ok(available_slots(&hours, duration, &booked, exclude))
            })
            .await?;
        Ok(AvailableSlots(slots))
    }
}
