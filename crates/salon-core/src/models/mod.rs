//! Data models for appointments, clients, the service catalog and the slot
//! grid.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping the data structures free of
//! presentation logic.
//!
//! Validated request types ([`NewAppointment`], [`AppointmentPatch`],
//! [`AppointmentFilter`], ...) are built from the loosely typed structures in
//! [`crate::params`] through `TryFrom`.
//!
//! # Examples
//!
//! ```rust
//! use salon_core::models::{AppointmentStatus, Money};
//!
//! let price: Money = "80.5".parse().unwrap();
//! assert_eq!(price.to_string(), "80.50");
//! assert_eq!(price.percentage(40.0).to_string(), "32.20");
//!
//! let status: AppointmentStatus = "cancelled".parse().unwrap();
//! assert!(status.is_canceled());
//! ```

pub mod appointment;
pub mod catalog;
pub mod client;
pub mod filters;
pub mod money;
pub mod page;
pub mod requests;
pub mod slot;
pub mod status;

#[cfg(test)]
pub(crate) mod tests;

pub use appointment::Appointment;
pub use catalog::{Employee, Service, Specialty};
pub use client::Client;
pub use filters::{AppointmentFilter, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use money::Money;
pub use page::{AppointmentPage, UpcomingPage};
pub use requests::{
    AppointmentPatch, ClientRef, MergedAppointment, NewAppointment, NewService,
    SlotGenerationRequest, StatusChange, validate_commission_rate, MAX_GENERATION_DAYS,
};
pub use slot::{AvailableSlot, SlotCell, SlotGenerationSummary};
pub use status::AppointmentStatus;
