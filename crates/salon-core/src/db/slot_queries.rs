//! Slot grid persistence.

use jiff::civil::{Date, Time};
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension};

use super::{
    catalog_queries::employee_exists,
    rows::{date_to_sql, slot_from_row, time_to_sql, SLOT_COLUMNS},
};
use crate::{
    booking::grid_cells,
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{SlotCell, SlotGenerationRequest, SlotGenerationSummary},
};

const INSERT_SLOT_SQL: &str = "INSERT OR IGNORE INTO time_slots (employee_id, date, start_time, end_time, is_available) VALUES (?1, ?2, ?3, ?4, 1)";
const OCCUPY_SLOT_SQL: &str = "UPDATE time_slots SET is_available = 0 WHERE employee_id = ?1 AND date = ?2 AND start_time = ?3 AND is_available = 1";
const RELEASE_SLOT_SQL: &str =
    "UPDATE time_slots SET is_available = 1 WHERE employee_id = ?1 AND date = ?2 AND start_time = ?3";

/// Outcome of claiming the slot cell at a booking's start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOccupancy {
    /// No cell exists at that start time; nothing to claim
    NoCell,
    /// The cell was free and is now marked unavailable
    Occupied,
    /// The cell exists and was already unavailable
    AlreadyTaken,
}

pub(crate) fn fetch_slot_cell(
    conn: &Connection,
    employee_id: u64,
    date: Date,
    start_time: Time,
) -> Result<Option<SlotCell>> {
    let sql = format!(
        "SELECT {SLOT_COLUMNS} FROM time_slots WHERE employee_id = ?1 AND date = ?2 AND start_time = ?3"
    );
    conn.query_row(
        &sql,
        params![employee_id as i64, date_to_sql(date), time_to_sql(start_time)],
        slot_from_row,
    )
    .optional()
    .db_context("Failed to query slot")
}

/// Marks the cell unavailable if it is free.
///
/// The conditional update detects a cell taken by a concurrent writer
/// without a separate read.
pub(crate) fn occupy_slot(
    conn: &Connection,
    employee_id: u64,
    date: Date,
    start_time: Time,
) -> Result<SlotOccupancy> {
    let changed = conn
        .execute(
            OCCUPY_SLOT_SQL,
            params![employee_id as i64, date_to_sql(date), time_to_sql(start_time)],
        )
        .db_context("Failed to occupy slot")?;
    if changed > 0 {
        return Ok(SlotOccupancy::Occupied);
    }

    Ok(match fetch_slot_cell(conn, employee_id, date, start_time)? {
        Some(_) => SlotOccupancy::AlreadyTaken,
        None => SlotOccupancy::NoCell,
    })
}

/// Marks the cell available again. Returns false when no cell exists.
pub(crate) fn release_slot(
    conn: &Connection,
    employee_id: u64,
    date: Date,
    start_time: Time,
) -> Result<bool> {
    let changed = conn
        .execute(
            RELEASE_SLOT_SQL,
            params![employee_id as i64, date_to_sql(date), time_to_sql(start_time)],
        )
        .db_context("Failed to release slot")?;
    Ok(changed > 0)
}

impl super::Database {
    /// Bulk-provisions slot cells for every employee and day in the request.
    ///
    /// Existing cells are left untouched, so repeated runs with the same
    /// parameters change nothing.
    pub fn generate_slots(
        &mut self,
        request: &SlotGenerationRequest,
    ) -> Result<SlotGenerationSummary> {
        let cells = grid_cells(request.day_start, request.day_end, request.interval_minutes);
        let days = request.days();

        self.in_unit_of_work(|uow| {
            let conn = uow.connection();
            for &employee_id in &request.employee_ids {
                if !employee_exists(conn, employee_id)? {
                    return Err(SchedulerError::invalid_input("employee_ids")
                        .with_reason(format!("Unknown employee {employee_id}")));
                }
            }

            let mut stmt = conn
                .prepare(INSERT_SLOT_SQL)
                .db_context("Failed to prepare slot insert")?;
            let mut created = 0;
            for &employee_id in &request.employee_ids {
                for &day in &days {
                    let day_str = date_to_sql(day);
                    for cell in &cells {
                        created += stmt
                            .execute(params![
                                employee_id as i64,
                                day_str,
                                time_to_sql(cell.start_time()),
                                time_to_sql(cell.end_time()),
                            ])
                            .db_context("Failed to insert slot")?;
                    }
                }
                debug!("Provisioned slots for employee {employee_id}");
            }

            let summary = SlotGenerationSummary {
                employees: request.employee_ids.len(),
                days: days.len(),
                requested: request.employee_ids.len() * days.len() * cells.len(),
                created,
            };
            info!(
                "Generated {} of {} requested slots",
                summary.created, summary.requested
            );
            Ok(summary)
        })
    }

    /// Persisted cells of one employee on one day, in start-time order.
    pub fn list_slots(&self, employee_id: u64, date: Date) -> Result<Vec<SlotCell>> {
        let sql = format!(
            "SELECT {SLOT_COLUMNS} FROM time_slots WHERE employee_id = ?1 AND date = ?2 ORDER BY start_time"
        );
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;
        let slots = stmt
            .query_map(params![employee_id as i64, date_to_sql(date)], slot_from_row)
            .db_context("Failed to query slots")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read slots")?;
        Ok(slots)
    }

    /// The cell at one employee's start time, if the grid has one.
    pub fn slot_cell(
        &self,
        employee_id: u64,
        date: Date,
        start_time: Time,
    ) -> Result<Option<SlotCell>> {
        fetch_slot_cell(&self.connection, employee_id, date, start_time)
    }
}
