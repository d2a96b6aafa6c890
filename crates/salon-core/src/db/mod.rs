//! SQLite persistence for appointments, clients, the catalog and the slot
//! grid.
//!
//! Read-only queries are exposed as methods on [`Database`]. Every booking
//! mutation runs inside a [`UnitOfWork`], an immediate transaction that is
//! committed on success and rolled back on every error path.

use std::{path::Path, time::Duration};

use log::warn;
use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod appointment_queries;
pub mod bookings;
pub mod catalog_queries;
pub mod client_queries;
pub mod migrations;
pub(crate) mod rows;
pub mod slot_queries;
pub mod unit_of_work;

pub use appointment_queries::AppointmentRecord;
pub use slot_queries::SlotOccupancy;
pub use unit_of_work::UnitOfWork;

/// How long a connection waits on another writer's lock before failing.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a connection with the default busy timeout and initializes the
    /// schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(path, DEFAULT_BUSY_TIMEOUT)
    }

    /// Opens a connection waiting up to `busy_timeout` for locks held by
    /// other connections.
    pub fn open<P: AsRef<Path>>(path: P, busy_timeout: Duration) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(busy_timeout)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Begins an immediate transaction.
    ///
    /// SQLite reserves the write lock up front, so the conflict check and
    /// the slot mutation of concurrent bookings are serialized.
    pub fn unit_of_work(&mut self) -> Result<UnitOfWork<'_>> {
        UnitOfWork::begin(&mut self.connection)
    }

    /// Runs `work` in a unit of work, committing when it succeeds.
    ///
    /// On failure a rollback is attempted; a failing rollback is logged and
    /// the original error is still returned.
    pub fn in_unit_of_work<T>(
        &mut self,
        work: impl FnOnce(&UnitOfWork<'_>) -> Result<T>,
    ) -> Result<T> {
        let uow = self.unit_of_work()?;
        match work(&uow) {
            Ok(value) => {
                uow.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = uow.rollback() {
                    warn!("Rollback failed after error '{err}': {rollback_err}");
                }
                Err(err)
            }
        }
    }
}
