//! Column codecs and row builders shared by the query modules.

use jiff::{
    civil::{Date, Time},
    Timestamp,
};
use rusqlite::{types::Type, Row};

use crate::models::{Appointment, AppointmentStatus, Client, Employee, Money, Service, SlotCell};

pub(crate) const APPOINTMENT_COLUMNS: &str = "a.id, a.client_id, a.employee_id, a.service_id, \
     a.date, a.start_time, a.duration_minutes, a.status, a.price_cents, a.commission_cents, \
     a.notes, c.name, e.name, s.name, a.created_at, a.updated_at";

pub(crate) const APPOINTMENT_FROM: &str = "appointments a \
     LEFT JOIN clients c ON c.id = a.client_id \
     LEFT JOIN employees e ON e.id = a.employee_id \
     LEFT JOIN services s ON s.id = a.service_id";

pub(crate) const CLIENT_COLUMNS: &str =
    "id, name, phone, total_visits, total_spent_cents, first_visit, last_visit, created_at";

pub(crate) const SLOT_COLUMNS: &str = "employee_id, date, start_time, end_time, is_available";

/// Storage form of a calendar day.
pub(crate) fn date_to_sql(date: Date) -> String {
    date.to_string()
}

/// Storage form of a time of day; `HH:MM:SS` sorts lexicographically.
pub(crate) fn time_to_sql(time: Time) -> String {
    time.strftime("%H:%M:%S").to_string()
}

fn conversion_error(
    idx: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

fn invalid_data(idx: usize, message: String) -> rusqlite::Error {
    conversion_error(
        idx,
        std::io::Error::new(std::io::ErrorKind::InvalidData, message),
    )
}

pub(crate) fn id_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    Ok(row.get::<_, i64>(idx)? as u64)
}

pub(crate) fn date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Date> {
    row.get::<_, String>(idx)?
        .parse::<Date>()
        .map_err(|e| conversion_error(idx, e))
}

pub(crate) fn optional_date_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Date>> {
    row.get::<_, Option<String>>(idx)?
        .map(|value| value.parse::<Date>().map_err(|e| conversion_error(idx, e)))
        .transpose()
}

pub(crate) fn time_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Time> {
    let value: String = row.get(idx)?;
    Time::strptime("%H:%M:%S", &value).map_err(|e| conversion_error(idx, e))
}

pub(crate) fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_error(idx, e))
}

pub(crate) fn minutes_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<u32> {
    let value: i64 = row.get(idx)?;
    u32::try_from(value).map_err(|_| invalid_data(idx, format!("Invalid duration: {value}")))
}

pub(crate) fn money_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Money> {
    Ok(Money::from_cents(row.get(idx)?))
}

fn status_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<AppointmentStatus> {
    let status_str: String = row.get(idx)?;
    status_str
        .parse::<AppointmentStatus>()
        .map_err(|_| invalid_data(idx, format!("Invalid appointment status: {status_str}")))
}

/// Builds an appointment from a row selected with [`APPOINTMENT_COLUMNS`].
pub(crate) fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: id_at(row, 0)?,
        client_id: id_at(row, 1)?,
        employee_id: id_at(row, 2)?,
        service_id: id_at(row, 3)?,
        date: date_at(row, 4)?,
        start_time: time_at(row, 5)?,
        duration_minutes: minutes_at(row, 6)?,
        status: status_at(row, 7)?,
        price: money_at(row, 8)?,
        commission_amount: row.get::<_, Option<i64>>(9)?.map(Money::from_cents),
        notes: row.get(10)?,
        client_name: row.get(11)?,
        employee_name: row.get(12)?,
        service_name: row.get(13)?,
        created_at: timestamp_at(row, 14)?,
        updated_at: timestamp_at(row, 15)?,
    })
}

/// Builds a client from a row selected with [`CLIENT_COLUMNS`].
pub(crate) fn client_from_row(row: &Row<'_>) -> rusqlite::Result<Client> {
    let total_visits: i64 = row.get(3)?;
    Ok(Client {
        id: id_at(row, 0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        total_visits: u32::try_from(total_visits)
            .map_err(|_| invalid_data(3, format!("Invalid visit count: {total_visits}")))?,
        total_spent: money_at(row, 4)?,
        first_visit: optional_date_at(row, 5)?,
        last_visit: optional_date_at(row, 6)?,
        created_at: timestamp_at(row, 7)?,
    })
}

/// Builds a service from `id, name, duration_minutes, recommended_price_cents, created_at`.
pub(crate) fn service_from_row(row: &Row<'_>) -> rusqlite::Result<Service> {
    Ok(Service {
        id: id_at(row, 0)?,
        name: row.get(1)?,
        duration_minutes: minutes_at(row, 2)?,
        recommended_price: money_at(row, 3)?,
        created_at: timestamp_at(row, 4)?,
    })
}

/// Builds an employee from `id, name, phone, created_at`.
pub(crate) fn employee_from_row(row: &Row<'_>) -> rusqlite::Result<Employee> {
    Ok(Employee {
        id: id_at(row, 0)?,
        name: row.get(1)?,
        phone: row.get(2)?,
        created_at: timestamp_at(row, 3)?,
    })
}

/// Builds a slot cell from a row selected with [`SLOT_COLUMNS`].
pub(crate) fn slot_from_row(row: &Row<'_>) -> rusqlite::Result<SlotCell> {
    Ok(SlotCell {
        employee_id: id_at(row, 0)?,
        date: date_at(row, 1)?,
        start_time: time_at(row, 2)?,
        end_time: time_at(row, 3)?,
        is_available: row.get(4)?,
    })
}
