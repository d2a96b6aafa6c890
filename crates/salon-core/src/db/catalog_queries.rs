//! Employees, services and commission specialties.

use jiff::Timestamp;
use log::info;
use rusqlite::{params, Connection, OptionalExtension};

use super::rows::{employee_from_row, service_from_row};
use crate::{
    error::{DatabaseResultExt, Result, SchedulerError},
    models::{Employee, NewService, Service, Specialty},
};

const INSERT_EMPLOYEE_SQL: &str =
    "INSERT INTO employees (name, phone, created_at) VALUES (?1, ?2, ?3)";
const SELECT_EMPLOYEE_SQL: &str = "SELECT id, name, phone, created_at FROM employees WHERE id = ?1";
const LIST_EMPLOYEES_SQL: &str = "SELECT id, name, phone, created_at FROM employees ORDER BY name, id";
const CHECK_EMPLOYEE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ?1)";

const INSERT_SERVICE_SQL: &str = "INSERT INTO services (name, duration_minutes, recommended_price_cents, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_SERVICE_SQL: &str = "SELECT id, name, duration_minutes, recommended_price_cents, created_at FROM services WHERE id = ?1";
const LIST_SERVICES_SQL: &str = "SELECT id, name, duration_minutes, recommended_price_cents, created_at FROM services ORDER BY name, id";

const UPSERT_SPECIALTY_SQL: &str = "INSERT INTO service_specialties (employee_id, service_id, commission_rate) VALUES (?1, ?2, ?3) \
     ON CONFLICT(employee_id, service_id) DO UPDATE SET commission_rate = excluded.commission_rate";
const SELECT_RATE_SQL: &str =
    "SELECT commission_rate FROM service_specialties WHERE employee_id = ?1 AND service_id = ?2";

pub(crate) fn employee_exists(conn: &Connection, id: u64) -> Result<bool> {
    conn.query_row(CHECK_EMPLOYEE_EXISTS_SQL, params![id as i64], |row| row.get(0))
        .db_context("Failed to check employee existence")
}

pub(crate) fn fetch_service(conn: &Connection, id: u64) -> Result<Option<Service>> {
    conn.query_row(SELECT_SERVICE_SQL, params![id as i64], service_from_row)
        .optional()
        .db_context("Failed to query service")
}

pub(crate) fn fetch_commission_rate(
    conn: &Connection,
    employee_id: u64,
    service_id: u64,
) -> Result<Option<f64>> {
    conn.query_row(
        SELECT_RATE_SQL,
        params![employee_id as i64, service_id as i64],
        |row| row.get(0),
    )
    .optional()
    .db_context("Failed to query commission rate")
}

impl super::Database {
    /// Adds an employee.
    pub fn add_employee(&mut self, name: &str, phone: Option<&str>) -> Result<Employee> {
        let now = Timestamp::now();
        self.connection
            .execute(INSERT_EMPLOYEE_SQL, params![name, phone, now.to_string()])
            .db_context("Failed to insert employee")?;
        let id = self.connection.last_insert_rowid() as u64;
        info!("Added employee {id}");

        Ok(Employee {
            id,
            name: name.to_string(),
            phone: phone.map(String::from),
            created_at: now,
        })
    }

    pub fn get_employee(&self, id: u64) -> Result<Option<Employee>> {
        self.connection
            .query_row(SELECT_EMPLOYEE_SQL, params![id as i64], employee_from_row)
            .optional()
            .db_context("Failed to query employee")
    }

    pub fn list_employees(&self) -> Result<Vec<Employee>> {
        let mut stmt = self
            .connection
            .prepare(LIST_EMPLOYEES_SQL)
            .db_context("Failed to prepare query")?;
        let employees = stmt
            .query_map([], employee_from_row)
            .db_context("Failed to query employees")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read employees")?;
        Ok(employees)
    }

    /// Adds a service to the catalog.
    pub fn add_service(&mut self, service: &NewService) -> Result<Service> {
        let now = Timestamp::now();
        self.connection
            .execute(
                INSERT_SERVICE_SQL,
                params![
                    service.name,
                    service.duration_minutes,
                    service.recommended_price.cents(),
                    now.to_string()
                ],
            )
            .db_context("Failed to insert service")?;
        let id = self.connection.last_insert_rowid() as u64;
        info!("Added service {id}");

        Ok(Service {
            id,
            name: service.name.clone(),
            duration_minutes: service.duration_minutes,
            recommended_price: service.recommended_price,
            created_at: now,
        })
    }

    pub fn get_service(&self, id: u64) -> Result<Option<Service>> {
        fetch_service(&self.connection, id)
    }

    pub fn list_services(&self) -> Result<Vec<Service>> {
        let mut stmt = self
            .connection
            .prepare(LIST_SERVICES_SQL)
            .db_context("Failed to prepare query")?;
        let services = stmt
            .query_map([], service_from_row)
            .db_context("Failed to query services")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read services")?;
        Ok(services)
    }

    /// Sets (or replaces) the commission rate an employee earns on a
    /// service. `rate` must already be validated.
    pub fn set_specialty(&mut self, employee_id: u64, service_id: u64, rate: f64) -> Result<Specialty> {
        self.in_unit_of_work(|uow| {
            let conn = uow.connection();
            if !employee_exists(conn, employee_id)? {
                return Err(SchedulerError::EmployeeNotFound { id: employee_id });
            }
            if fetch_service(conn, service_id)?.is_none() {
                return Err(SchedulerError::ServiceNotFound { id: service_id });
            }
            conn.execute(
                UPSERT_SPECIALTY_SQL,
                params![employee_id as i64, service_id as i64, rate],
            )
            .db_context("Failed to upsert specialty")?;
            Ok(())
        })?;
        info!("Employee {employee_id} earns {rate}% on service {service_id}");

        Ok(Specialty {
            employee_id,
            service_id,
            commission_rate: rate,
        })
    }

    /// Commission percentage for the pair, if a specialty exists.
    pub fn commission_rate(&self, employee_id: u64, service_id: u64) -> Result<Option<f64>> {
        fetch_commission_rate(&self.connection, employee_id, service_id)
    }
}
