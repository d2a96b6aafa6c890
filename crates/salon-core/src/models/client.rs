//! Client model definition.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::Money;

/// A client of the business, deduplicated by phone number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Client {
    /// Unique identifier for the client
    pub id: u64,

    /// Display name
    pub name: String,

    /// Phone number, unique across clients
    pub phone: String,

    /// Number of appointments currently completed
    pub total_visits: u32,

    /// Sum of prices of completed appointments
    pub total_spent: Money,

    /// Day the client was first seen
    pub first_visit: Option<Date>,

    /// Day of the most recent completed visit
    pub last_visit: Option<Date>,

    /// Timestamp when the client was created (UTC)
    pub created_at: Timestamp,
}
