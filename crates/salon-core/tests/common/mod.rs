#![allow(dead_code)]

use jiff::civil::{date, Date};
use salon_core::{
    models::{Employee, NewAppointment, NewService, Service},
    params::CreateAppointment,
    Database, Scheduler, SchedulerBuilder,
};
use tempfile::{NamedTempFile, TempDir};

/// Day used for every booking in these tests.
pub const DAY: &str = "2099-03-14";

/// Stamp used as "today" for clients and visits.
pub fn today() -> Date {
    date(2099, 3, 1)
}

/// Helper function to create a temporary database for testing
pub fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

/// Helper function to create a test scheduler
pub async fn create_test_scheduler() -> (TempDir, Scheduler) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let scheduler = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create scheduler");
    (temp_dir, scheduler)
}

pub fn add_employee(db: &mut Database, name: &str) -> Employee {
    db.add_employee(name, None).expect("Failed to add employee")
}

pub fn add_service(db: &mut Database, name: &str, minutes: u32, cents: i64) -> Service {
    db.add_service(&NewService {
        name: name.to_string(),
        duration_minutes: minutes,
        recommended_price: salon_core::Money::from_cents(cents),
    })
    .expect("Failed to add service")
}

/// A walk-in booking request on [`DAY`].
pub fn booking(employee_id: u64, service_id: u64, start: &str, phone: &str) -> NewAppointment {
    NewAppointment::try_from(CreateAppointment {
        employee_id,
        service_id,
        date: DAY.to_string(),
        start_time: start.to_string(),
        client_name: Some(format!("Client {phone}")),
        client_phone: Some(phone.to_string()),
        ..Default::default()
    })
    .expect("Valid booking parameters")
}
