//! Client directory and visit statistics.

use jiff::{civil::Date, Timestamp};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};

use super::rows::{client_from_row, date_to_sql, CLIENT_COLUMNS};
use crate::{
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{Client, Money},
};

const INSERT_CLIENT_SQL: &str = "INSERT INTO clients (name, phone, total_visits, total_spent_cents, first_visit, last_visit, created_at) VALUES (?1, ?2, 0, 0, ?3, ?3, ?4)";
const CHECK_CLIENT_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM clients WHERE id = ?1)";
const RECORD_VISIT_SQL: &str = "UPDATE clients SET total_visits = total_visits + 1, total_spent_cents = total_spent_cents + ?2, first_visit = COALESCE(first_visit, ?3), last_visit = ?3 WHERE id = ?1";
const REVOKE_VISIT_SQL: &str = "UPDATE clients SET total_visits = MAX(total_visits - 1, 0), total_spent_cents = MAX(total_spent_cents - ?2, 0) WHERE id = ?1";

pub(crate) fn fetch_client(conn: &Connection, id: u64) -> Result<Option<Client>> {
    let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE id = ?1");
    conn.query_row(&sql, params![id as i64], client_from_row)
        .optional()
        .db_context("Failed to query client")
}

pub(crate) fn fetch_client_by_phone(conn: &Connection, phone: &str) -> Result<Option<Client>> {
    let sql = format!("SELECT {CLIENT_COLUMNS} FROM clients WHERE phone = ?1");
    conn.query_row(&sql, params![phone], client_from_row)
        .optional()
        .db_context("Failed to query client by phone")
}

pub(crate) fn client_exists(conn: &Connection, id: u64) -> Result<bool> {
    conn.query_row(CHECK_CLIENT_EXISTS_SQL, params![id as i64], |row| row.get(0))
        .db_context("Failed to check client existence")
}

/// Inserts a client with zero totals, first and last seen on `today`.
pub(crate) fn insert_client(conn: &Connection, name: &str, phone: &str, today: Date) -> Result<Client> {
    let now = Timestamp::now();
    conn.execute(
        INSERT_CLIENT_SQL,
        params![name, phone, date_to_sql(today), now.to_string()],
    )
    .db_context("Failed to insert client")?;
    let id = conn.last_insert_rowid() as u64;
    info!("Registered client {id}");

    Ok(Client {
        id,
        name: name.to_string(),
        phone: phone.to_string(),
        total_visits: 0,
        total_spent: Money::ZERO,
        first_visit: Some(today),
        last_visit: Some(today),
        created_at: now,
    })
}

pub(crate) fn record_visit(conn: &Connection, client_id: u64, amount: Money, day: Date) -> Result<()> {
    conn.execute(
        RECORD_VISIT_SQL,
        params![client_id as i64, amount.cents(), date_to_sql(day)],
    )
    .db_context("Failed to record client visit")?;
    Ok(())
}

pub(crate) fn revoke_visit(conn: &Connection, client_id: u64, amount: Money) -> Result<()> {
    conn.execute(REVOKE_VISIT_SQL, params![client_id as i64, amount.cents()])
        .db_context("Failed to revoke client visit")?;
    Ok(())
}

impl super::Database {
    pub fn get_client(&self, id: u64) -> Result<Option<Client>> {
        fetch_client(&self.connection, id)
    }

    pub fn find_client_by_phone(&self, phone: &str) -> Result<Option<Client>> {
        fetch_client_by_phone(&self.connection, phone)
    }

    /// Registers a client. Phone numbers are unique.
    pub fn create_client(&mut self, name: &str, phone: &str, today: Date) -> Result<Client> {
        self.in_unit_of_work(|uow| {
            let conn = uow.connection();
            if let Some(existing) = fetch_client_by_phone(conn, phone)? {
                return Err(SchedulerError::invalid_input("phone").with_reason(format!(
                    "Phone already registered to client {}",
                    existing.id
                )));
            }
            insert_client(conn, name, phone, today)
        })
    }
}
