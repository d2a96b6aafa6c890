//! Appointment model definition and related functionality.

use jiff::{
    civil::{Date, Time},
    Timestamp,
};
use serde::{Deserialize, Serialize};

use super::{AppointmentStatus, Money};
use crate::{booking::Interval, error::Result};

/// A booked appointment of one client with one employee for one service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique identifier for the appointment
    pub id: u64,

    /// Client the appointment is booked for
    pub client_id: u64,

    /// Employee performing the service
    pub employee_id: u64,

    /// Service being delivered
    pub service_id: u64,

    /// Calendar day of the appointment
    pub date: Date,

    /// Start time of day
    pub start_time: Time,

    /// Duration copied from the service at booking time
    pub duration_minutes: u32,

    /// Current lifecycle status
    #[serde(default)]
    pub status: AppointmentStatus,

    /// Price copied from the service at booking time
    pub price: Money,

    /// Commission credited to the employee, absent without a specialty rate
    pub commission_amount: Option<Money>,

    /// Free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Joined client name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,

    /// Joined employee name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_name: Option<String>,

    /// Joined service name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    /// Timestamp when the appointment was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the appointment was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Appointment {
    /// The half-open time interval this appointment occupies.
    pub fn interval(&self) -> Result<Interval> {
        Interval::starting_at(self.start_time, self.duration_minutes)
    }

    /// Returns true when the appointment blocks its employee's schedule.
    pub fn is_active(&self) -> bool {
        !self.status.is_canceled()
    }
}
