//! Transactional unit of work passed through the booking protocol.

use jiff::{
    civil::{Date, Time},
    Timestamp,
};
use rusqlite::{Connection, Transaction, TransactionBehavior};

use super::{
    appointment_queries::{self as appointments, AppointmentRecord},
    catalog_queries, client_queries,
    slot_queries::{self as slots, SlotOccupancy},
};
use crate::{
    booking::{BookedInterval, ClientDirectory, CommissionRates, ServiceCatalog, VisitStats},
    error::{DatabaseResultExt, Result},
    models::{Appointment, AppointmentStatus, Client, Money, Service},
};

/// One immediate transaction.
///
/// Consumed by [`UnitOfWork::commit`] or [`UnitOfWork::rollback`]; dropping
/// it without either rolls back.
pub struct UnitOfWork<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> UnitOfWork<'conn> {
    pub(super) fn begin(connection: &'conn mut Connection) -> Result<Self> {
        let tx = connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;
        Ok(Self { tx })
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit().db_context("Failed to commit transaction")
    }

    pub fn rollback(self) -> Result<()> {
        self.tx.rollback().db_context("Failed to roll back transaction")
    }

    pub(crate) fn connection(&self) -> &Connection {
        &self.tx
    }

    /// Loads an appointment. The transaction already holds the write lock,
    /// so the row cannot change underneath the caller.
    pub fn appointment(&self, id: u64) -> Result<Option<Appointment>> {
        appointments::fetch_appointment(&self.tx, id)
    }

    pub fn booked_intervals(&self, employee_id: u64, date: Date) -> Result<Vec<BookedInterval>> {
        appointments::fetch_booked_intervals(&self.tx, employee_id, date)
    }

    pub fn insert_appointment(&self, record: &AppointmentRecord) -> Result<u64> {
        appointments::insert_appointment(&self.tx, record, Timestamp::now())
    }

    pub fn update_appointment(&self, id: u64, record: &AppointmentRecord) -> Result<()> {
        appointments::update_appointment(&self.tx, id, record, Timestamp::now())
    }

    pub fn set_status(&self, id: u64, status: &AppointmentStatus) -> Result<()> {
        appointments::update_status(&self.tx, id, status, Timestamp::now())
    }

    pub fn delete_appointment(&self, id: u64) -> Result<bool> {
        appointments::delete_appointment(&self.tx, id)
    }

    pub fn employee_exists(&self, id: u64) -> Result<bool> {
        catalog_queries::employee_exists(&self.tx, id)
    }

    pub fn client_exists(&self, id: u64) -> Result<bool> {
        client_queries::client_exists(&self.tx, id)
    }

    pub fn occupy_slot(&self, employee_id: u64, date: Date, start_time: Time) -> Result<SlotOccupancy> {
        slots::occupy_slot(&self.tx, employee_id, date, start_time)
    }

    pub fn release_slot(&self, employee_id: u64, date: Date, start_time: Time) -> Result<bool> {
        slots::release_slot(&self.tx, employee_id, date, start_time)
    }
}

impl ServiceCatalog for UnitOfWork<'_> {
    fn service(&self, service_id: u64) -> Result<Option<Service>> {
        catalog_queries::fetch_service(&self.tx, service_id)
    }
}

impl CommissionRates for UnitOfWork<'_> {
    fn commission_rate(&self, employee_id: u64, service_id: u64) -> Result<Option<f64>> {
        catalog_queries::fetch_commission_rate(&self.tx, employee_id, service_id)
    }
}

impl ClientDirectory for UnitOfWork<'_> {
    fn find_by_phone(&self, phone: &str) -> Result<Option<Client>> {
        client_queries::fetch_client_by_phone(&self.tx, phone)
    }

    fn create_client(&self, name: &str, phone: &str, today: Date) -> Result<Client> {
        client_queries::insert_client(&self.tx, name, phone, today)
    }
}

impl VisitStats for UnitOfWork<'_> {
    fn record_visit(&self, client_id: u64, amount: Money, day: Date) -> Result<()> {
        client_queries::record_visit(&self.tx, client_id, amount, day)
    }

    fn revoke_visit(&self, client_id: u64, amount: Money) -> Result<()> {
        client_queries::revoke_visit(&self.tx, client_id, amount)
    }
}
