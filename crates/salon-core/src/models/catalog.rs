//! Services, employees and per-employee commission rates.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::Money;

/// A bookable service with its default duration and price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Service {
    pub id: u64,
    pub name: String,
    pub duration_minutes: u32,
    pub recommended_price: Money,
    pub created_at: Timestamp,
}

/// A member of staff who performs services.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Employee {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: Timestamp,
}

/// Commission percentage an employee earns on a service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Specialty {
    pub employee_id: u64,
    pub service_id: u64,
    /// Percentage in `0..=100`
    pub commission_rate: f64,
}
