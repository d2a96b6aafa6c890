//! Tests for the scheduler module.

use tempfile::TempDir;
use tokio::sync::broadcast::error::TryRecvError;

use super::*;
use crate::{
    error::ErrorKind,
    models::{AppointmentStatus, Employee, Money, Service},
    notify::BookingEvent,
    params::{
        AvailableSlots, CreateAppointment, CreateEmployee, CreateService, FindClient, Id,
        SetSpecialty, TransitionStatus, Upcoming, UpdateAppointment,
    },
};

/// Helper function to create a test scheduler
async fn create_test_scheduler() -> (TempDir, Scheduler) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let scheduler = SchedulerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create scheduler");
    (temp_dir, scheduler)
}

async fn seed_catalog(scheduler: &Scheduler) -> (Employee, Service) {
    let employee = scheduler
        .add_employee(&CreateEmployee {
            name: "Bia".to_string(),
            phone: None,
        })
        .await
        .expect("Failed to add employee");
    let service = scheduler
        .add_service(&CreateService {
            name: "Coloring".to_string(),
            duration_minutes: 60,
            recommended_price: 80.0,
        })
        .await
        .expect("Failed to add service");
    (employee, service)
}

fn walk_in(employee: &Employee, service: &Service, date: &str, start: &str) -> CreateAppointment {
    CreateAppointment {
        employee_id: employee.id,
        service_id: service.id,
        date: date.to_string(),
        start_time: start.to_string(),
        client_name: Some("Ana Souza".to_string()),
        client_phone: Some("555-0101".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_appointment_resolves_service_and_commission() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let (employee, service) = seed_catalog(&scheduler).await;
    scheduler
        .set_specialty(&SetSpecialty {
            employee_id: employee.id,
            service_id: service.id,
            commission_rate: 40.0,
        })
        .await
        .expect("Failed to set specialty");

    let appointment = scheduler
        .create_appointment(&walk_in(&employee, &service, "2099-03-14", "14:00"))
        .await
        .expect("Failed to book");

    assert_eq!(appointment.duration_minutes, 60);
    assert_eq!(appointment.price, Money::from_cents(8000));
    assert_eq!(appointment.commission_amount, Some(Money::from_cents(3200)));
    assert_eq!(appointment.status, AppointmentStatus::Scheduled);
    assert_eq!(appointment.client_name.as_deref(), Some("Ana Souza"));

    let client = scheduler
        .find_client(&FindClient {
            phone: "555-0101".to_string(),
        })
        .await
        .expect("Failed to look up client")
        .expect("Walk-in client should be registered");
    assert_eq!(client.id, appointment.client_id);
    assert_eq!(client.total_visits, 0);
}

#[tokio::test]
async fn test_events_follow_committed_changes() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let (employee, service) = seed_catalog(&scheduler).await;
    let mut events = scheduler.notifications().subscribe();

    let appointment = scheduler
        .create_appointment(&walk_in(&employee, &service, "2099-03-14", "09:00"))
        .await
        .expect("Failed to book");
    match events.try_recv() {
        Ok(BookingEvent::Created { appointment: event }) => assert_eq!(event.id, appointment.id),
        other => panic!("Expected created event, got {other:?}"),
    }

    // Rejected bookings publish nothing.
    let conflict = scheduler
        .create_appointment(&walk_in(&employee, &service, "2099-03-14", "09:30"))
        .await
        .expect_err("Overlapping booking should fail");
    assert_eq!(conflict.kind(), ErrorKind::Conflict);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));

    scheduler
        .transition_status(&TransitionStatus {
            id: appointment.id,
            status: "completed".to_string(),
        })
        .await
        .expect("Failed to complete");
    match events.try_recv() {
        Ok(BookingEvent::StatusChanged { previous, .. }) => {
            assert_eq!(previous, AppointmentStatus::Scheduled)
        }
        other => panic!("Expected status event, got {other:?}"),
    }

    // Re-applying the current status is a no-op without an event.
    let transition = scheduler
        .transition_status(&TransitionStatus {
            id: appointment.id,
            status: "completed".to_string(),
        })
        .await
        .expect("Repeated transition should succeed");
    assert_eq!(transition.previous, AppointmentStatus::Completed);
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[tokio::test]
async fn test_available_slots_around_existing_booking() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let (employee, service) = seed_catalog(&scheduler).await;
    let booked = scheduler
        .create_appointment(&walk_in(&employee, &service, "2099-03-14", "14:00"))
        .await
        .expect("Failed to book");

    let params = AvailableSlots {
        employee_id: employee.id,
        date: "2099-03-14".to_string(),
        service_id: Some(service.id),
        exclude_appointment_id: None,
    };
    let slots = scheduler
        .available_slots(&params)
        .await
        .expect("Failed to compute availability");
    let starts: Vec<String> = slots
        .iter()
        .map(|slot| slot.start_time.strftime("%H:%M").to_string())
        .collect();
    assert!(starts.contains(&"13:00".to_string()));
    assert!(starts.contains(&"15:00".to_string()));
    assert!(!starts.contains(&"13:30".to_string()));
    assert!(!starts.contains(&"14:00".to_string()));
    assert!(!starts.contains(&"14:30".to_string()));
    assert_eq!(starts.last().map(String::as_str), Some("17:00"));

    let rescheduling = scheduler
        .available_slots(&AvailableSlots {
            exclude_appointment_id: Some(booked.id),
            ..params
        })
        .await
        .expect("Failed to compute availability");
    assert_eq!(rescheduling.len(), 19);
}

#[tokio::test]
async fn test_update_to_same_time_does_not_conflict_with_itself() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let (employee, service) = seed_catalog(&scheduler).await;
    let appointment = scheduler
        .create_appointment(&walk_in(&employee, &service, "2099-03-14", "10:00"))
        .await
        .expect("Failed to book");

    let updated = scheduler
        .update_appointment(&UpdateAppointment {
            id: appointment.id,
            start_time: Some("10:00".to_string()),
            notes: Some("Same time, new note".to_string()),
            ..Default::default()
        })
        .await
        .expect("Updating in place should succeed");
    assert_eq!(updated.start_time, appointment.start_time);
    assert_eq!(updated.notes.as_deref(), Some("Same time, new note"));
}

#[tokio::test]
async fn test_upcoming_skips_canceled() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;
    let (employee, service) = seed_catalog(&scheduler).await;
    let kept = scheduler
        .create_appointment(&walk_in(&employee, &service, "2099-03-14", "10:00"))
        .await
        .expect("Failed to book");
    let canceled = scheduler
        .create_appointment(&walk_in(&employee, &service, "2099-03-14", "12:00"))
        .await
        .expect("Failed to book");
    scheduler
        .transition_status(&TransitionStatus {
            id: canceled.id,
            status: "canceled".to_string(),
        })
        .await
        .expect("Failed to cancel");

    let upcoming = scheduler
        .upcoming(&Upcoming::default())
        .await
        .expect("Failed to list upcoming");
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id, kept.id);
}

#[tokio::test]
async fn test_lookup_errors_are_classified() {
    let (_temp_dir, scheduler) = create_test_scheduler().await;

    let missing = scheduler
        .get_service(&Id { id: 99 })
        .await
        .expect_err("Unknown service should fail");
    assert_eq!(missing.kind(), ErrorKind::NotFound);

    let deleted = scheduler
        .delete_appointment(&Id { id: 99 })
        .await
        .expect_err("Unknown appointment should fail");
    assert!(matches!(deleted, SchedulerError::AppointmentNotFound { id: 99 }));

    let invalid = scheduler
        .set_specialty(&SetSpecialty {
            employee_id: 1,
            service_id: 1,
            commission_rate: 120.0,
        })
        .await
        .expect_err("Rate above 100 should fail");
    assert_eq!(invalid.kind(), ErrorKind::Validation);
}
