//! Paginated appointment listings.

use serde::{Deserialize, Serialize};

use super::Appointment;

/// One page of a filtered appointment listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentPage {
    pub items: Vec<Appointment>,
    /// Number of appointments matching the filter across all pages
    pub total: u64,
    /// 1-based page number
    pub page: u32,
    pub limit: u32,
}

impl AppointmentPage {
    /// Total number of pages for the filter.
    pub fn page_count(&self) -> u64 {
        if self.limit == 0 {
            0
        } else {
            let limit = u64::from(self.limit);
            (self.total + limit - 1) / limit
        }
    }
}

/// An offset/limit window over upcoming appointments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingPage {
    pub items: Vec<Appointment>,
    pub total: u64,
    pub offset: u32,
    pub limit: u32,
    /// True when appointments exist past this window
    pub has_more: bool,
}
