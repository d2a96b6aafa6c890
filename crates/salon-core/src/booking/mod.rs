//! The booking engine.
//!
//! - [`interval`]: half-open minute intervals within a day
//! - [`conflict`]: double-booking detection over those intervals
//! - [`slots`]: slot grid layout and on-the-fly availability
//! - [`stats`]: client visit aggregates driven by status transitions
//! - [`ports`]: lookups the engine needs from the catalog and client directory
//! - [`ledger`]: the create/update/delete/transition protocol tying them
//!   together inside a [`crate::db::UnitOfWork`]

pub mod conflict;
pub mod interval;
pub mod ledger;
pub mod ports;
pub mod slots;
pub mod stats;

pub use conflict::{find_conflict, has_conflict, BookedInterval};
pub use interval::{minute_of_day, time_of_minute, Interval, MINUTES_PER_DAY};
pub use ledger::{AppointmentLedger, Transition};
pub use ports::{ClientDirectory, CommissionRates, ServiceCatalog, VisitStats};
pub use slots::{available_slots, grid_cells};
pub use stats::{ClientStatsProjector, StatsEffect, Visit};
