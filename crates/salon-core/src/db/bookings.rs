//! Transactional entry points for booking mutations.

use jiff::civil::Date;
use log::info;

use crate::{
    booking::{AppointmentLedger, Transition},
    error::Result,
    models::{Appointment, AppointmentPatch, NewAppointment, StatusChange},
};

impl super::Database {
    /// Books an appointment in one transaction.
    pub fn create_appointment(
        &mut self,
        request: &NewAppointment,
        today: Date,
    ) -> Result<Appointment> {
        let appointment =
            self.in_unit_of_work(|uow| AppointmentLedger::new(uow, today).create(request))?;
        info!(
            "Booked appointment {} for employee {} on {} at {}",
            appointment.id, appointment.employee_id, appointment.date, appointment.start_time
        );
        Ok(appointment)
    }

    /// Applies a patch to an appointment in one transaction.
    pub fn update_appointment(
        &mut self,
        id: u64,
        patch: &AppointmentPatch,
        today: Date,
    ) -> Result<Appointment> {
        let appointment =
            self.in_unit_of_work(|uow| AppointmentLedger::new(uow, today).update(id, patch))?;
        info!("Updated appointment {id}");
        Ok(appointment)
    }

    /// Deletes an appointment in one transaction, returning the removed row.
    pub fn delete_appointment(&mut self, id: u64, today: Date) -> Result<Appointment> {
        let appointment =
            self.in_unit_of_work(|uow| AppointmentLedger::new(uow, today).delete(id))?;
        info!("Deleted appointment {id}");
        Ok(appointment)
    }

    /// Changes an appointment's status in one transaction.
    pub fn transition_status(&mut self, change: &StatusChange, today: Date) -> Result<Transition> {
        let transition =
            self.in_unit_of_work(|uow| AppointmentLedger::new(uow, today).transition(change))?;
        info!(
            "Appointment {} moved from {} to {}",
            change.id,
            transition.previous.as_str(),
            transition.appointment.status.as_str()
        );
        Ok(transition)
    }
}
