//! Fire-and-forget booking notifications.
//!
//! Events are published only after the transaction that produced them has
//! committed. Delivery is best effort: a send with no listeners is dropped,
//! and nothing here can fail a booking.

use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::models::{Appointment, AppointmentStatus};

const CHANNEL_CAPACITY: usize = 256;

/// A committed change to the appointment ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BookingEvent {
    Created { appointment: Appointment },
    Updated { appointment: Appointment },
    Deleted { appointment: Appointment },
    StatusChanged {
        appointment: Appointment,
        previous: AppointmentStatus,
    },
}

impl BookingEvent {
    pub fn appointment(&self) -> &Appointment {
        match self {
            BookingEvent::Created { appointment }
            | BookingEvent::Updated { appointment }
            | BookingEvent::Deleted { appointment }
            | BookingEvent::StatusChanged { appointment, .. } => appointment,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            BookingEvent::Created { .. } => "created",
            BookingEvent::Updated { .. } => "updated",
            BookingEvent::Deleted { .. } => "deleted",
            BookingEvent::StatusChanged { .. } => "status_changed",
        }
    }
}

/// Broadcast hub for booking events.
#[derive(Debug)]
pub struct NotifyHub {
    sender: broadcast::Sender<BookingEvent>,
}

impl NotifyHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Subscribe to all booking events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<BookingEvent> {
        self.sender.subscribe()
    }

    /// Publish an event. No-op if nobody is listening.
    pub fn publish(&self, event: BookingEvent) {
        let name = event.name();
        let id = event.appointment().id;
        match self.sender.send(event) {
            Ok(listeners) => debug!("Delivered {name} event for appointment {id} to {listeners} listener(s)"),
            Err(_) => debug!("No listeners for {name} event on appointment {id}"),
        }
    }
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_appointment;

    #[tokio::test]
    async fn test_subscribe_and_receive() {
        let hub = NotifyHub::new();
        let mut rx = hub.subscribe();

        let event = BookingEvent::Created {
            appointment: sample_appointment(),
        };
        hub.publish(event.clone());

        let received = rx.recv().await.unwrap();
        assert_eq!(received, event);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let hub = NotifyHub::new();
        hub.publish(BookingEvent::Deleted {
            appointment: sample_appointment(),
        });
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = BookingEvent::StatusChanged {
            appointment: sample_appointment(),
            previous: AppointmentStatus::Scheduled,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "status_changed");
        assert_eq!(json["previous"], "scheduled");
    }
}
