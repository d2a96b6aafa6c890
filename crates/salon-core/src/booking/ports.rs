//! Collaborator interfaces consumed by the booking engine.
//!
//! Each lookup that may miss returns an `Option` instead of an error so the
//! caller decides whether absence is a validation failure, a not-found, or
//! simply "no commission".

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{Client, Money, Service},
};

/// Read-only view of the service catalog.
pub trait ServiceCatalog {
    fn service(&self, service_id: u64) -> Result<Option<Service>>;
}

/// Per-employee commission rates.
pub trait CommissionRates {
    /// Percentage the employee earns on the service, if a specialty exists.
    fn commission_rate(&self, employee_id: u64, service_id: u64) -> Result<Option<f64>>;
}

/// Find-or-create access to clients, keyed by phone.
pub trait ClientDirectory {
    fn find_by_phone(&self, phone: &str) -> Result<Option<Client>>;

    /// Creates a client with zero totals, first seen on `today`.
    fn create_client(&self, name: &str, phone: &str, today: Date) -> Result<Client>;
}

/// Incremental client visit aggregates.
pub trait VisitStats {
    /// Adds one visit worth `amount` and stamps `day` as the last visit.
    fn record_visit(&self, client_id: u64, amount: Money, day: Date) -> Result<()>;

    /// Removes one visit worth `amount`, never going below zero.
    fn revoke_visit(&self, client_id: u64, amount: Money) -> Result<()>;
}
