//! Core library for the salon appointment scheduler.
//!
//! This crate books appointments for employees against a per-day slot grid,
//! rejecting double bookings, deriving duration, price and commission from
//! the service catalog, and keeping client visit statistics in step with
//! appointment status changes.
//!
//! - [`scheduler`]: async facade used by the CLI and the MCP server
//! - [`booking`]: intervals, conflict detection, availability, the booking
//!   ledger and client statistics
//! - [`db`]: SQLite persistence and the transactional unit of work
//! - [`models`] and [`params`]: domain types and request shapes
//! - [`display`]: markdown rendering of results
//! - [`notify`]: post-commit booking events
//! - [`auth`]: caller roles and self-service scoping
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use salon_core::{
//!     params::{AvailableSlots, CreateAppointment, CreateEmployee, CreateService},
//!     SchedulerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let scheduler = SchedulerBuilder::new()
//!     .with_database_path(Some("salon.db"))
//!     .build()
//!     .await?;
//!
//! let employee = scheduler
//!     .add_employee(&CreateEmployee {
//!         name: "Bia".to_string(),
//!         phone: None,
//!     })
//!     .await?;
//! let service = scheduler
//!     .add_service(&CreateService {
//!         name: "Coloring".to_string(),
//!         duration_minutes: 60,
//!         recommended_price: 80.0,
//!     })
//!     .await?;
//!
//! let appointment = scheduler
//!     .create_appointment(&CreateAppointment {
//!         employee_id: employee.id,
//!         service_id: service.id,
//!         date: "2026-03-14".to_string(),
//!         start_time: "14:00".to_string(),
//!         client_name: Some("Ana Souza".to_string()),
//!         client_phone: Some("555-0101".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{appointment}");
//!
//! let open = scheduler
//!     .available_slots(&AvailableSlots {
//!         employee_id: employee.id,
//!         date: "2026-03-14".to_string(),
//!         service_id: Some(service.id),
//!         exclude_appointment_id: None,
//!     })
//!     .await?;
//! println!("{open}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod booking;
pub mod config;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod notify;
pub mod params;
pub mod scheduler;

// Re-export commonly used types
pub use auth::{Caller, Role};
pub use booking::Transition;
pub use config::BusinessHours;
pub use db::Database;
pub use display::{
    Appointments, AvailableSlots, CreateResult, DeleteResult, Employees, OperationStatus,
    Services, SlotCells, UpdateResult,
};
pub use error::{ErrorKind, Result, SchedulerError};
pub use models::{
    Appointment, AppointmentPage, AppointmentStatus, Client, Employee, Money, Service,
    SlotCell, SlotGenerationSummary, Specialty, UpcomingPage,
};
pub use notify::{BookingEvent, NotifyHub};
pub use scheduler::{Scheduler, SchedulerBuilder};
