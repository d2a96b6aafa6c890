//! Appointment operations for the Scheduler.

use log::warn;

use super::{now, today, Scheduler};
use crate::{
    booking::Transition,
    display::Appointments,
    error::{Result, SchedulerError},
    models::{
        Appointment, AppointmentFilter, AppointmentPage, AppointmentPatch, NewAppointment,
        StatusChange, UpcomingPage,
    },
    notify::BookingEvent,
    params::{
        parse_date, AppointmentsByDate, AppointmentsByEmployee, CreateAppointment, Id,
        ListAppointments, TransitionStatus, Upcoming, UpdateAppointment,
    },
};

/// Default number of upcoming appointments returned.
pub const DEFAULT_UPCOMING_LIMIT: u32 = 10;

impl Scheduler {
    /// Books a new appointment.
    ///
    /// Duration and price are taken from the service; the commission from
    /// the employee's specialty, if any. Walk-in clients are matched by
    /// phone or created.
    pub async fn create_appointment(&self, params: &CreateAppointment) -> Result<Appointment> {
        let request = NewAppointment::try_from(params.clone())?;
        let today = today();

        let appointment = self
            .with_database(move |db| db.create_appointment(&request, today))
            .await?;

        self.notify.publish(BookingEvent::Created {
            appointment: appointment.clone(),
        });
        Ok(appointment)
    }

    /// Applies a partial update to an appointment.
    pub async fn update_appointment(&self, params: &UpdateAppointment) -> Result<Appointment> {
        let id = params.id;
        let patch = AppointmentPatch::try_from(params.clone())?;
        if patch.is_empty() {
            warn!("Update of appointment {id} carries no changes");
        }
        let today = today();

        let appointment = self
            .with_database(move |db| db.update_appointment(id, &patch, today))
            .await?;

        self.notify.publish(BookingEvent::Updated {
            appointment: appointment.clone(),
        });
        Ok(appointment)
    }

    /// Deletes an appointment and frees its slot cell.
    pub async fn delete_appointment(&self, params: &Id) -> Result<Appointment> {
        let id = params.id;
        let today = today();

        let appointment = self
            .with_database(move |db| db.delete_appointment(id, today))
            .await?;

        self.notify.publish(BookingEvent::Deleted {
            appointment: appointment.clone(),
        });
        Ok(appointment)
    }

    /// Moves an appointment to a new status, applying client statistics.
    pub async fn transition_status(&self, params: &TransitionStatus) -> Result<Transition> {
        let change = StatusChange::try_from(params.clone())?;
        let today = today();

        let transition = self
            .with_database(move |db| db.transition_status(&change, today))
            .await?;

        if transition.previous != transition.appointment.status {
            self.notify.publish(BookingEvent::StatusChanged {
                appointment: transition.appointment.clone(),
                previous: transition.previous.clone(),
            });
        }
        Ok(transition)
    }

    /// Retrieves an appointment by its ID.
    pub async fn get_appointment(&self, params: &Id) -> Result<Option<Appointment>> {
        let id = params.id;
        self.with_database(move |db| db.get_appointment(id)).await
    }

    /// Retrieves an appointment, failing with `AppointmentNotFound` if absent.
    pub async fn show_appointment(&self, params: &Id) -> Result<Appointment> {
        self.get_appointment(params)
            .await?
            .ok_or(SchedulerError::AppointmentNotFound { id: params.id })
    }

    /// Filtered, paginated listing ordered newest first.
    pub async fn list_appointments(&self, params: &ListAppointments) -> Result<AppointmentPage> {
        let filter = AppointmentFilter::try_from(params)?;
        self.with_database(move |db| db.list_appointments(&filter))
            .await
    }

    /// All appointments on one day, in start-time order.
    pub async fn appointments_by_date(&self, params: &AppointmentsByDate) -> Result<Appointments> {
        let date = parse_date("date", &params.date)?;
        let appointments = self
            .with_database(move |db| db.appointments_by_date(date))
            .await?;
        Ok(Appointments(appointments))
    }

    /// One employee's appointments, optionally on one day only.
    pub async fn appointments_by_employee(
        &self,
        params: &AppointmentsByEmployee,
    ) -> Result<Appointments> {
        let employee_id = params.employee_id;
        let date = params
            .date
            .as_deref()
            .map(|value| parse_date("date", value))
            .transpose()?;
        let appointments = self
            .with_database(move |db| db.appointments_by_employee(employee_id, date))
            .await?;
        Ok(Appointments(appointments))
    }

    /// The next non-canceled appointments from now on.
    pub async fn upcoming(&self, params: &Upcoming) -> Result<Appointments> {
        let page = self
            .upcoming_page(&Upcoming {
                offset: None,
                ..params.clone()
            })
            .await?;
        Ok(Appointments(page.items))
    }

    /// An offset/limit window over upcoming appointments.
    pub async fn upcoming_page(&self, params: &Upcoming) -> Result<UpcomingPage> {
        let limit = upcoming_limit(params.limit)?;
        let offset = params.offset.unwrap_or(0);
        let employee_id = params.employee_id;
        let now = now();

        self.with_database(move |db| db.upcoming_page(now, employee_id, offset, limit))
            .await
    }
}

fn upcoming_limit(limit: Option<u32>) -> Result<u32> {
    match limit {
        None => Ok(DEFAULT_UPCOMING_LIMIT),
        Some(0) => Err(SchedulerError::invalid_input("limit")
            .with_reason("Limit must be greater than zero")),
        Some(limit) => Ok(limit.min(crate::models::MAX_PAGE_LIMIT)),
    }
}
