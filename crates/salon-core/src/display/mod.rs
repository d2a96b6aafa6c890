//! Markdown display wrappers for scheduler results.
//!
//! Domain models implement [`Display`](std::fmt::Display) directly (see
//! [`models`]); collections and operation outcomes are wrapped in newtypes
//! so the CLI and the MCP server render the same text.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Collections &   │    │   Formatted     │
//! │ (Appointment,   │───▶│ Result Types    │───▶│    Output       │
//! │  Client, ...)   │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! - [`collections`]: `Appointments`, `AvailableSlots`, `SlotCells`,
//!   `Employees`, `Services` and the appointment pages
//! - [`results`]: `CreateResult`, `UpdateResult`, `DeleteResult`
//! - [`status`]: `OperationStatus`
//! - [`datetime`]: timestamp and time-of-day formatting
//!
//! ```rust
//! use salon_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Generated 20 slots".to_string());
//! assert!(status.to_string().starts_with("Success:"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Appointments, AvailableSlots, Employees, Services, SlotCells};
pub use datetime::{ClockTime, LocalDateTime};
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
