//! Slot grid cells and availability results.

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

/// A persisted bookable cell for one employee on one day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SlotCell {
    pub employee_id: u64,
    pub date: Date,
    pub start_time: Time,
    pub end_time: Time,
    /// False while an appointment occupies the cell's start time
    pub is_available: bool,
}

/// A start time at which a service of the requested duration fits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvailableSlot {
    pub start_time: Time,
    pub end_time: Time,
}

/// Outcome of a bulk slot generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct SlotGenerationSummary {
    /// Number of employees covered
    pub employees: usize,
    /// Number of calendar days in the range
    pub days: usize,
    /// Cells the grid called for
    pub requested: usize,
    /// Cells actually inserted; existing cells are left untouched
    pub created: usize,
}
