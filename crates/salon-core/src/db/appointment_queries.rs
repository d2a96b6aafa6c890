//! Appointment persistence and read queries.

use jiff::{
    civil::{Date, DateTime, Time},
    Timestamp,
};
use rusqlite::{params, Connection, OptionalExtension, ToSql};

use super::rows::{
    appointment_from_row, date_to_sql, id_at, minutes_at, time_at, time_to_sql,
    APPOINTMENT_COLUMNS, APPOINTMENT_FROM,
};
use crate::{
    booking::{BookedInterval, Interval},
    error::{DatabaseResultExt, Result},
    models::{Appointment, AppointmentFilter, AppointmentPage, AppointmentStatus, Money, UpcomingPage},
};

const INSERT_APPOINTMENT_SQL: &str = "INSERT INTO appointments (client_id, employee_id, service_id, date, start_time, duration_minutes, status, price_cents, commission_cents, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)";
const UPDATE_APPOINTMENT_SQL: &str = "UPDATE appointments SET client_id = ?1, employee_id = ?2, service_id = ?3, date = ?4, start_time = ?5, duration_minutes = ?6, status = ?7, price_cents = ?8, commission_cents = ?9, notes = ?10, updated_at = ?11 WHERE id = ?12";
const UPDATE_STATUS_SQL: &str = "UPDATE appointments SET status = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_APPOINTMENT_SQL: &str = "DELETE FROM appointments WHERE id = ?1";
const SELECT_BOOKED_SQL: &str = "SELECT id, start_time, duration_minutes FROM appointments WHERE employee_id = ?1 AND date = ?2 AND status != 'canceled' ORDER BY start_time";
const UPCOMING_CONDITION: &str =
    "(a.date > ? OR (a.date = ? AND a.start_time > ?)) AND a.status != 'canceled'";

/// Column values written for an appointment row.
#[derive(Debug, Clone, PartialEq)]
pub struct AppointmentRecord {
    pub client_id: u64,
    pub employee_id: u64,
    pub service_id: u64,
    pub date: Date,
    pub start_time: Time,
    pub duration_minutes: u32,
    pub status: AppointmentStatus,
    pub price: Money,
    pub commission_amount: Option<Money>,
    pub notes: Option<String>,
}

pub(crate) fn fetch_appointment(conn: &Connection, id: u64) -> Result<Option<Appointment>> {
    let sql = format!("SELECT {APPOINTMENT_COLUMNS} FROM {APPOINTMENT_FROM} WHERE a.id = ?1");
    conn.query_row(&sql, params![id as i64], appointment_from_row)
        .optional()
        .db_context("Failed to query appointment")
}

/// Intervals held by non-canceled appointments of one employee on one day.
pub(crate) fn fetch_booked_intervals(
    conn: &Connection,
    employee_id: u64,
    date: Date,
) -> Result<Vec<BookedInterval>> {
    let mut stmt = conn
        .prepare(SELECT_BOOKED_SQL)
        .db_context("Failed to prepare query")?;
    let rows = stmt
        .query_map(params![employee_id as i64, date_to_sql(date)], |row| {
            Ok((id_at(row, 0)?, time_at(row, 1)?, minutes_at(row, 2)?))
        })
        .db_context("Failed to query booked intervals")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read booked intervals")?;

    rows.into_iter()
        .map(|(appointment_id, start, duration)| {
            Ok(BookedInterval {
                appointment_id,
                interval: Interval::starting_at(start, duration)?,
            })
        })
        .collect()
}

pub(crate) fn insert_appointment(
    conn: &Connection,
    record: &AppointmentRecord,
    now: Timestamp,
) -> Result<u64> {
    conn.execute(
        INSERT_APPOINTMENT_SQL,
        params![
            record.client_id as i64,
            record.employee_id as i64,
            record.service_id as i64,
            date_to_sql(record.date),
            time_to_sql(record.start_time),
            record.duration_minutes,
            record.status.as_str(),
            record.price.cents(),
            record.commission_amount.map(|c| c.cents()),
            record.notes,
            now.to_string(),
        ],
    )
    .db_context("Failed to insert appointment")?;
    Ok(conn.last_insert_rowid() as u64)
}

pub(crate) fn update_appointment(
    conn: &Connection,
    id: u64,
    record: &AppointmentRecord,
    now: Timestamp,
) -> Result<()> {
    conn.execute(
        UPDATE_APPOINTMENT_SQL,
        params![
            record.client_id as i64,
            record.employee_id as i64,
            record.service_id as i64,
            date_to_sql(record.date),
            time_to_sql(record.start_time),
            record.duration_minutes,
            record.status.as_str(),
            record.price.cents(),
            record.commission_amount.map(|c| c.cents()),
            record.notes,
            now.to_string(),
            id as i64,
        ],
    )
    .db_context("Failed to update appointment")?;
    Ok(())
}

pub(crate) fn update_status(
    conn: &Connection,
    id: u64,
    status: &AppointmentStatus,
    now: Timestamp,
) -> Result<()> {
    conn.execute(
        UPDATE_STATUS_SQL,
        params![status.as_str(), now.to_string(), id as i64],
    )
    .db_context("Failed to update appointment status")?;
    Ok(())
}

pub(crate) fn delete_appointment(conn: &Connection, id: u64) -> Result<bool> {
    let deleted = conn
        .execute(DELETE_APPOINTMENT_SQL, params![id as i64])
        .db_context("Failed to delete appointment")?;
    Ok(deleted > 0)
}

fn query_appointments(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> Result<Vec<Appointment>> {
    let mut stmt = conn.prepare(sql).db_context("Failed to prepare query")?;
    let appointments = stmt
        .query_map(params, appointment_from_row)
        .db_context("Failed to query appointments")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .db_context("Failed to read appointments")?;
    Ok(appointments)
}

impl super::Database {
    /// Retrieves an appointment with its joined display names.
    pub fn get_appointment(&self, id: u64) -> Result<Option<Appointment>> {
        fetch_appointment(&self.connection, id)
    }

    /// Intervals held by non-canceled appointments of one employee on one day.
    pub fn booked_intervals(&self, employee_id: u64, date: Date) -> Result<Vec<BookedInterval>> {
        fetch_booked_intervals(&self.connection, employee_id, date)
    }

    /// Lists appointments matching the filter, newest first, one page at a
    /// time.
    pub fn list_appointments(&self, filter: &AppointmentFilter) -> Result<AppointmentPage> {
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(ref status) = filter.status {
            conditions.push("a.status = ?");
            params_vec.push(Box::new(status.as_str().to_string()));
        }

        if let Some(employee_id) = filter.employee_id {
            conditions.push("a.employee_id = ?");
            params_vec.push(Box::new(employee_id as i64));
        }

        if let Some(from) = filter.date_from {
            conditions.push("a.date >= ?");
            params_vec.push(Box::new(date_to_sql(from)));
        }

        if let Some(to) = filter.date_to {
            conditions.push("a.date <= ?");
            params_vec.push(Box::new(date_to_sql(to)));
        }

        if let Some(ref name) = filter.client_name {
            conditions.push("instr(lower(c.name), lower(?)) > 0");
            params_vec.push(Box::new(name.clone()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let params_refs: Vec<&dyn ToSql> = params_vec.iter().map(|b| &**b).collect();

        let count_sql = format!("SELECT COUNT(*) FROM {APPOINTMENT_FROM}{where_clause}");
        let total: i64 = self
            .connection
            .query_row(&count_sql, &params_refs[..], |row| row.get(0))
            .db_context("Failed to count appointments")?;

        let limit = i64::from(filter.limit);
        let offset = filter.offset() as i64;
        let mut page_params = params_refs.clone();
        page_params.push(&limit);
        page_params.push(&offset);

        let sql = format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM {APPOINTMENT_FROM}{where_clause} \
             ORDER BY a.date DESC, a.start_time DESC, a.id DESC LIMIT ? OFFSET ?"
        );
        let items = query_appointments(&self.connection, &sql, &page_params)?;

        Ok(AppointmentPage {
            items,
            total: total as u64,
            page: filter.page,
            limit: filter.limit,
        })
    }

    /// All appointments on one day, in start-time order.
    pub fn appointments_by_date(&self, date: Date) -> Result<Vec<Appointment>> {
        let sql = format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM {APPOINTMENT_FROM} WHERE a.date = ?1 \
             ORDER BY a.start_time, a.employee_id, a.id"
        );
        query_appointments(&self.connection, &sql, &[&date_to_sql(date)])
    }

    /// Appointments of one employee, optionally restricted to one day.
    pub fn appointments_by_employee(
        &self,
        employee_id: u64,
        date: Option<Date>,
    ) -> Result<Vec<Appointment>> {
        let employee = employee_id as i64;
        match date {
            Some(date) => {
                let sql = format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM {APPOINTMENT_FROM} \
                     WHERE a.employee_id = ?1 AND a.date = ?2 ORDER BY a.start_time, a.id"
                );
                query_appointments(&self.connection, &sql, &[&employee, &date_to_sql(date)])
            }
            None => {
                let sql = format!(
                    "SELECT {APPOINTMENT_COLUMNS} FROM {APPOINTMENT_FROM} \
                     WHERE a.employee_id = ?1 ORDER BY a.date, a.start_time, a.id"
                );
                query_appointments(&self.connection, &sql, &[&employee])
            }
        }
    }

    /// The next `limit` non-canceled appointments after `now`.
    pub fn upcoming_appointments(
        &self,
        now: DateTime,
        employee_id: Option<u64>,
        limit: u32,
    ) -> Result<Vec<Appointment>> {
        Ok(self.upcoming_page(now, employee_id, 0, limit)?.items)
    }

    /// An offset/limit window over non-canceled appointments later than
    /// `now` (a later day, or today with a later start time), soonest first.
    pub fn upcoming_page(
        &self,
        now: DateTime,
        employee_id: Option<u64>,
        offset: u32,
        limit: u32,
    ) -> Result<UpcomingPage> {
        let today = date_to_sql(now.date());
        let current_time = time_to_sql(now.time());
        let employee = employee_id.map(|id| id as i64);

        let mut where_clause = format!(" WHERE {UPCOMING_CONDITION}");
        let mut params_refs: Vec<&dyn ToSql> = vec![&today, &today, &current_time];
        if let Some(ref employee) = employee {
            where_clause.push_str(" AND a.employee_id = ?");
            params_refs.push(employee);
        }

        let count_sql = format!("SELECT COUNT(*) FROM {APPOINTMENT_FROM}{where_clause}");
        let total: i64 = self
            .connection
            .query_row(&count_sql, &params_refs[..], |row| row.get(0))
            .db_context("Failed to count upcoming appointments")?;

        let limit_value = i64::from(limit);
        let offset_value = i64::from(offset);
        params_refs.push(&limit_value);
        params_refs.push(&offset_value);

        let sql = format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM {APPOINTMENT_FROM}{where_clause} \
             ORDER BY a.date, a.start_time, a.id LIMIT ? OFFSET ?"
        );
        let items = query_appointments(&self.connection, &sql, &params_refs)?;
        let total = total as u64;

        Ok(UpcomingPage {
            has_more: u64::from(offset) + (items.len() as u64) < total,
            items,
            total,
            offset,
            limit,
        })
    }
}
