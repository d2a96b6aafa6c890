use jiff::{
    civil::{date, time},
    Timestamp,
};

use crate::models::{Appointment, AppointmentStatus, Money};

pub(crate) fn sample_appointment() -> Appointment {
    Appointment {
        id: 12,
        client_id: 3,
        employee_id: 1,
        service_id: 4,
        date: date(2026, 3, 14),
        start_time: time(14, 0, 0, 0),
        duration_minutes: 60,
        status: AppointmentStatus::Scheduled,
        price: Money::from_cents(8000),
        commission_amount: Some(Money::from_cents(3200)),
        notes: Some("Bring reference photo".to_string()),
        client_name: Some("Ana Souza".to_string()),
        employee_name: Some("Bia".to_string()),
        service_name: Some("Coloring".to_string()),
        created_at: Timestamp::from_second(1_773_400_000).unwrap(),
        updated_at: Timestamp::from_second(1_773_403_600).unwrap(),
    }
}

#[test]
fn test_appointment_interval() {
    let appointment = sample_appointment();
    let interval = appointment.interval().unwrap();
    assert_eq!(interval.start(), 14 * 60);
    assert_eq!(interval.end(), 15 * 60);
    assert!(appointment.is_active());
}

#[test]
fn test_canceled_appointment_is_inactive() {
    let mut appointment = sample_appointment();
    appointment.status = AppointmentStatus::Canceled;
    assert!(!appointment.is_active());
}

#[test]
fn test_appointment_json_shape() {
    let json = serde_json::to_value(sample_appointment()).unwrap();
    assert_eq!(json["date"], "2026-03-14");
    assert_eq!(json["start_time"], "14:00:00");
    assert_eq!(json["status"], "scheduled");
    assert_eq!(json["price"], 80.0);
    assert_eq!(json["commission_amount"], 32.0);
}
