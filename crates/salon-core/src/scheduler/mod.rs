//! High-level scheduler API.
//!
//! [`Scheduler`] is the async entry point shared by the CLI and the MCP
//! server. Every operation validates its parameters, then runs the
//! synchronous database work on a blocking thread against a fresh
//! connection:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │    Scheduler    │    │     Ledger      │    │    Database     │
//! │ (appointment_ops│───▶│ (booking::      │───▶│   (via db/)     │
//! │  slot_ops, ...) │    │  ledger)        │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!   Validation, events   Booking protocol       Unit of work
//! ```
//!
//! Booking mutations publish a [`BookingEvent`](crate::notify::BookingEvent)
//! on the configured [`NotifyHub`] once their transaction has committed.
//!
//! # Example
//!
//! ```rust,no_run
//! use salon_core::{params::CreateService, SchedulerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("/tmp/salon.db"))
//!     .build()
//!     .await?;
//!
//! let service = scheduler
//!     .add_service(&CreateService {
//!         name: "Haircut".to_string(),
//!         duration_minutes: 45,
//!         recommended_price: 80.0,
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::{path::PathBuf, sync::Arc, time::Duration};

use jiff::{
    civil::{Date, DateTime},
    Zoned,
};
use tokio::task;

use crate::{
    config::BusinessHours,
    db::Database,
    error::{Result, SchedulerError},
    notify::NotifyHub,
};

pub mod appointment_ops;
pub mod builder;
pub mod catalog_ops;
pub mod slot_ops;

#[cfg(test)]
mod tests;

pub use builder::SchedulerBuilder;

/// Main scheduler interface for bookings, the slot grid and the catalog.
#[derive(Debug, Clone)]
pub struct Scheduler {
    pub(crate) db_path: PathBuf,
    pub(crate) hours: BusinessHours,
    pub(crate) busy_timeout: Duration,
    pub(crate) notify: Arc<NotifyHub>,
}

impl Scheduler {
    pub(crate) fn new(
        db_path: PathBuf,
        hours: BusinessHours,
        busy_timeout: Duration,
        notify: Arc<NotifyHub>,
    ) -> Self {
        Self {
            db_path,
            hours,
            busy_timeout,
            notify,
        }
    }

    /// Business hours used for availability queries.
    pub fn business_hours(&self) -> &BusinessHours {
        &self.hours
    }

    /// Hub on which committed booking changes are published.
    pub fn notifications(&self) -> &Arc<NotifyHub> {
        &self.notify
    }

    /// Runs `work` on a blocking thread with its own connection.
    pub(crate) async fn with_database<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        let busy_timeout = self.busy_timeout;

        task::spawn_blocking(move || {
            let mut db = Database::open(&db_path, busy_timeout)?;
            work(&mut db)
        })
        .await
        .map_err(|e| SchedulerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

/// The current calendar day in the system time zone.
pub(crate) fn today() -> Date {
    Zoned::now().date()
}

/// The current wall-clock time in the system time zone.
pub(crate) fn now() -> DateTime {
    Zoned::now().datetime()
}
