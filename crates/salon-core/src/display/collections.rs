//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::models::{
    Appointment, AppointmentPage, AvailableSlot, Employee, Service, SlotCell, UpcomingPage,
};

/// Implements the shared slice-like accessors of a newtype collection.
macro_rules! collection {
    ($wrapper:ident, $item:ty) => {
        impl $wrapper {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn get(&self, index: usize) -> Option<&$item> {
                self.0.get(index)
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl Index<usize> for $wrapper {
            type Output = $item;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }

        impl IntoIterator for $wrapper {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<Self::Item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $wrapper {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

/// One compact list row per appointment.
fn appointment_line(f: &mut fmt::Formatter<'_>, appointment: &Appointment) -> fmt::Result {
    write!(
        f,
        "- **{}** {} {} · {}",
        appointment.id,
        appointment.date,
        appointment.time_range(),
        appointment
            .service_name
            .as_deref()
            .unwrap_or("(unknown service)")
    )?;
    if let Some(employee) = &appointment.employee_name {
        write!(f, " · {employee}")?;
    }
    if let Some(client) = &appointment.client_name {
        write!(f, " · {client}")?;
    }
    writeln!(f, " ({})", appointment.status.with_icon())
}

/// A list of appointments rendered one per line.
///
/// ```rust,ignore
/// let appointments = scheduler.appointments_by_date(&params).await?;
/// println!("{appointments}");
/// ```
pub struct Appointments(pub Vec<Appointment>);

collection!(Appointments, Appointment);

impl fmt::Display for Appointments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No appointments found.")
        } else {
            for appointment in &self.0 {
                appointment_line(f, appointment)?;
            }
            Ok(())
        }
    }
}

impl fmt::Display for AppointmentPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            writeln!(f, "No appointments found.")?;
        } else {
            for appointment in &self.items {
                appointment_line(f, appointment)?;
            }
        }
        writeln!(f)?;
        writeln!(
            f,
            "Page {} of {} ({} appointment(s), {} per page)",
            self.page,
            self.page_count().max(1),
            self.total,
            self.limit
        )
    }
}

impl fmt::Display for UpcomingPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.items.is_empty() {
            writeln!(f, "No upcoming appointments.")?;
        } else {
            for appointment in &self.items {
                appointment_line(f, appointment)?;
            }
        }
        if self.has_more {
            writeln!(f)?;
            writeln!(
                f,
                "Showing {} of {} upcoming; more after offset {}",
                self.items.len(),
                self.total,
                u64::from(self.offset) + self.items.len() as u64
            )?;
        }
        Ok(())
    }
}

/// Open start times for a booking.
pub struct AvailableSlots(pub Vec<AvailableSlot>);

collection!(AvailableSlots, AvailableSlot);

impl fmt::Display for AvailableSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No available slots.")
        } else {
            for slot in &self.0 {
                write!(f, "{slot}")?;
            }
            Ok(())
        }
    }
}

/// Persisted slot grid cells of one employee and day.
pub struct SlotCells(pub Vec<SlotCell>);

collection!(SlotCells, SlotCell);

impl fmt::Display for SlotCells {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No slots found.")
        } else {
            for cell in &self.0 {
                write!(f, "{cell}")?;
            }
            Ok(())
        }
    }
}

pub struct Employees(pub Vec<Employee>);

collection!(Employees, Employee);

impl fmt::Display for Employees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No employees found.")
        } else {
            for employee in &self.0 {
                write!(f, "{employee}")?;
            }
            Ok(())
        }
    }
}

pub struct Services(pub Vec<Service>);

collection!(Services, Service);

impl fmt::Display for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No services found.")
        } else {
            for service in &self.0 {
                write!(f, "{service}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use super::*;
    use crate::models::{tests::sample_appointment, AppointmentStatus};

    #[test]
    fn test_appointments_display() {
        let first = sample_appointment();
        let mut second = sample_appointment();
        second.id = 13;
        second.start_time = time(16, 0, 0, 0);
        second.status = AppointmentStatus::Canceled;

        let output = Appointments(vec![first, second]).to_string();
        assert!(output.contains("- **12** 2026-03-14 14:00-15:00 · Coloring · Bia · Ana Souza (○ Scheduled)"));
        assert!(output.contains("- **13** 2026-03-14 16:00-17:00"));
        assert!(output.contains("✗ Canceled"));
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(Appointments(vec![]).to_string(), "No appointments found.\n");
        assert_eq!(AvailableSlots(vec![]).to_string(), "No available slots.\n");
        assert_eq!(SlotCells(vec![]).to_string(), "No slots found.\n");
    }

    #[test]
    fn test_page_footer() {
        let page = AppointmentPage {
            items: vec![sample_appointment()],
            total: 45,
            page: 2,
            limit: 20,
        };
        let output = page.to_string();
        assert!(output.contains("Page 2 of 3 (45 appointment(s), 20 per page)"));
    }

    #[test]
    fn test_available_slots_display() {
        let slots = AvailableSlots(vec![AvailableSlot {
            start_time: time(13, 0, 0, 0),
            end_time: time(14, 0, 0, 0),
        }]);
        assert_eq!(slots.to_string(), "- 13:00-14:00\n");
        assert_eq!(slots.len(), 1);
    }
}
