//! The booking protocol: create, update, delete and status transitions.
//!
//! Every method runs against a caller-supplied [`UnitOfWork`] and performs
//! all of its reads and writes through it. The ledger never commits; the
//! caller commits on `Ok` and rolls back on `Err`, so a failure at any step
//! leaves no partial state behind.

use jiff::civil::{Date, Time};
use log::{debug, warn};

use super::{
    find_conflict,
    ports::{ClientDirectory, CommissionRates, ServiceCatalog},
    stats::{ClientStatsProjector, StatsEffect, Visit},
    Interval,
};
use crate::{
    db::{AppointmentRecord, SlotOccupancy, UnitOfWork},
    error::{Result, SchedulerError},
    models::{
        Appointment, AppointmentPatch, AppointmentStatus, ClientRef, Money, NewAppointment, Service,
        StatusChange,
    },
};

/// A committed status change with the status it replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub appointment: Appointment,
    pub previous: AppointmentStatus,
    pub effect: StatsEffect,
}

/// Orchestrates the booking protocol over one unit of work.
pub struct AppointmentLedger<'a, 'conn> {
    uow: &'a UnitOfWork<'conn>,
    today: Date,
}

impl<'a, 'conn> AppointmentLedger<'a, 'conn> {
    /// `today` stamps new clients and completed visits.
    pub fn new(uow: &'a UnitOfWork<'conn>, today: Date) -> Self {
        Self { uow, today }
    }

    /// Books a new appointment.
    ///
    /// Duration and price come from the service, the client is resolved or
    /// created, the interval is checked against the employee's other
    /// bookings that day, and the slot cell at the start time is claimed.
    pub fn create(&self, request: &NewAppointment) -> Result<Appointment> {
        let service = self.resolve_service(request.service_id)?;
        self.require_employee(request.employee_id)?;
        let interval = Interval::starting_at(request.start_time, service.duration_minutes)?;
        debug!(
            "Resolved service {} ({} min, {})",
            service.id, service.duration_minutes, service.recommended_price
        );

        let client_id = self.resolve_client(&request.client)?;

        if !request.status.is_canceled() {
            self.ensure_no_conflict(request.employee_id, request.date, &interval, None)?;
            self.claim_slot(request.employee_id, request.date, request.start_time)?;
        }

        let commission_amount =
            self.commission(request.employee_id, service.id, service.recommended_price)?;
        let record = AppointmentRecord {
            client_id,
            employee_id: request.employee_id,
            service_id: service.id,
            date: request.date,
            start_time: request.start_time,
            duration_minutes: service.duration_minutes,
            status: request.status.clone(),
            price: service.recommended_price,
            commission_amount,
            notes: request.notes.clone(),
        };
        let id = self.uow.insert_appointment(&record)?;
        debug!("Inserted appointment {id}");

        // Booking straight into a status is treated as leaving `scheduled`.
        let visit = Visit {
            client_id,
            price: record.price,
        };
        self.projector()
            .project(&AppointmentStatus::Scheduled, &record.status, visit, visit)?;

        self.load(id)
    }

    /// Merges `patch` over an existing appointment.
    ///
    /// Duration and price are re-resolved from the service and the
    /// commission from the current specialty rate on every update. The
    /// appointment's own interval is excluded from the conflict check, and
    /// the slot cell moves with the start time.
    pub fn update(&self, id: u64, patch: &AppointmentPatch) -> Result<Appointment> {
        let current = self.load(id)?;
        let merged = patch.merge(&current);

        let service = self.resolve_service(merged.service_id)?;
        if merged.employee_id != current.employee_id {
            self.require_employee(merged.employee_id)?;
        }
        let duration_minutes = service.duration_minutes;
        let price = service.recommended_price;
        let commission_amount = self.commission(merged.employee_id, service.id, price)?;

        if merged.client_id != current.client_id && !self.uow.client_exists(merged.client_id)? {
            return Err(SchedulerError::ClientNotFound {
                id: merged.client_id,
            });
        }

        let interval = Interval::starting_at(merged.start_time, duration_minutes)?;
        let was_active = current.is_active();
        let is_active = !merged.status.is_canceled();

        if is_active {
            self.ensure_no_conflict(merged.employee_id, merged.date, &interval, Some(id))?;
        }

        let same_cell = current.employee_id == merged.employee_id
            && current.date == merged.date
            && current.start_time == merged.start_time;
        if was_active && !(is_active && same_cell) {
            self.uow
                .release_slot(current.employee_id, current.date, current.start_time)?;
        }
        if is_active && !(was_active && same_cell) {
            self.claim_slot(merged.employee_id, merged.date, merged.start_time)?;
        }

        let record = AppointmentRecord {
            client_id: merged.client_id,
            employee_id: merged.employee_id,
            service_id: merged.service_id,
            date: merged.date,
            start_time: merged.start_time,
            duration_minutes,
            status: merged.status.clone(),
            price,
            commission_amount,
            notes: merged.notes,
        };
        self.uow.update_appointment(id, &record)?;
        debug!("Updated appointment {id}");

        self.projector().project(
            &current.status,
            &record.status,
            Visit {
                client_id: current.client_id,
                price: current.price,
            },
            Visit {
                client_id: record.client_id,
                price: record.price,
            },
        )?;

        self.load(id)
    }

    /// Removes an appointment and frees its slot cell.
    pub fn delete(&self, id: u64) -> Result<Appointment> {
        let current = self.load(id)?;
        if !self.uow.delete_appointment(id)? {
            return Err(SchedulerError::AppointmentNotFound { id });
        }
        if current.is_active() {
            self.uow
                .release_slot(current.employee_id, current.date, current.start_time)?;
        }
        debug!("Deleted appointment {id}");
        Ok(current)
    }

    /// Moves an appointment to a new status and applies client statistics.
    ///
    /// Canceling frees the slot cell; leaving `canceled` re-runs the conflict
    /// and slot checks. Setting the current status again is a no-op.
    pub fn transition(&self, change: &StatusChange) -> Result<Transition> {
        let current = self.load(change.id)?;
        let previous = current.status.clone();

        if previous == change.status {
            debug!(
                "Appointment {} already {}",
                change.id,
                previous.as_str()
            );
            return Ok(Transition {
                appointment: current,
                previous,
                effect: StatsEffect::None,
            });
        }

        let was_active = current.is_active();
        let is_active = !change.status.is_canceled();
        if was_active && !is_active {
            self.uow
                .release_slot(current.employee_id, current.date, current.start_time)?;
        } else if !was_active && is_active {
            let interval = current.interval()?;
            self.ensure_no_conflict(current.employee_id, current.date, &interval, Some(current.id))?;
            self.claim_slot(current.employee_id, current.date, current.start_time)?;
        }

        self.uow.set_status(current.id, &change.status)?;

        let visit = Visit {
            client_id: current.client_id,
            price: current.price,
        };
        let effect = self
            .projector()
            .project(&previous, &change.status, visit, visit)?;

        Ok(Transition {
            appointment: self.load(current.id)?,
            previous,
            effect,
        })
    }

    fn projector(&self) -> ClientStatsProjector<'_, UnitOfWork<'conn>> {
        ClientStatsProjector::new(self.uow, self.today)
    }

    fn load(&self, id: u64) -> Result<Appointment> {
        self.uow
            .appointment(id)?
            .ok_or(SchedulerError::AppointmentNotFound { id })
    }

    /// An unknown service in a booking is a validation failure.
    fn resolve_service(&self, service_id: u64) -> Result<Service> {
        self.uow.service(service_id)?.ok_or_else(|| {
            SchedulerError::invalid_input("service_id")
                .with_reason(format!("Unknown service {service_id}"))
        })
    }

    fn require_employee(&self, employee_id: u64) -> Result<()> {
        if self.uow.employee_exists(employee_id)? {
            Ok(())
        } else {
            Err(SchedulerError::invalid_input("employee_id")
                .with_reason(format!("Unknown employee {employee_id}")))
        }
    }

    fn resolve_client(&self, client: &ClientRef) -> Result<u64> {
        match client {
            ClientRef::Existing(id) => {
                if self.uow.client_exists(*id)? {
                    Ok(*id)
                } else {
                    Err(SchedulerError::ClientNotFound { id: *id })
                }
            }
            ClientRef::WalkIn { name, phone } => {
                if let Some(existing) = self.uow.find_by_phone(phone)? {
                    debug!("Matched walk-in to client {}", existing.id);
                    return Ok(existing.id);
                }
                let created = self.uow.create_client(name, phone, self.today)?;
                debug!("Created client {} for walk-in", created.id);
                Ok(created.id)
            }
        }
    }

    fn ensure_no_conflict(
        &self,
        employee_id: u64,
        date: Date,
        interval: &Interval,
        exclude: Option<u64>,
    ) -> Result<()> {
        let booked = self.uow.booked_intervals(employee_id, date)?;
        match find_conflict(interval, &booked, exclude) {
            Some(appointment_id) => {
                warn!(
                    "Rejected {interval} on {date} for employee {employee_id}: overlaps appointment {appointment_id}"
                );
                Err(SchedulerError::TimeConflict { appointment_id })
            }
            None => Ok(()),
        }
    }

    fn claim_slot(&self, employee_id: u64, date: Date, start_time: Time) -> Result<()> {
        match self.uow.occupy_slot(employee_id, date, start_time)? {
            SlotOccupancy::AlreadyTaken => {
                warn!("Rejected {date} {start_time} for employee {employee_id}: slot taken");
                Err(SchedulerError::SlotTaken {
                    employee_id,
                    date,
                    start_time,
                })
            }
            SlotOccupancy::Occupied => {
                debug!("Occupied slot {date} {start_time} for employee {employee_id}");
                Ok(())
            }
            SlotOccupancy::NoCell => Ok(()),
        }
    }

    /// `price × rate / 100` when the employee has a specialty for the service.
    fn commission(&self, employee_id: u64, service_id: u64, price: Money) -> Result<Option<Money>> {
        Ok(self
            .uow
            .commission_rate(employee_id, service_id)?
            .map(|rate| price.percentage(rate)))
    }
}
