//! Display implementations for domain models.
//!
//! Single records render as a markdown heading followed by a metadata
//! list; list rows use the compact `line` forms in [`super::collections`].

use std::fmt;

use super::datetime::{ClockTime, LocalDateTime};
use crate::{
    booking::{StatsEffect, Transition},
    models::{
        Appointment, AppointmentStatus, AvailableSlot, Client, Employee, Service, SlotCell,
        SlotGenerationSummary, Specialty,
    },
};

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// `name (ID: n)` when the joined name is known, `ID n` otherwise.
fn named(name: Option<&str>, id: u64) -> String {
    match name {
        Some(name) => format!("{name} (ID: {id})"),
        None => format!("ID {id}"),
    }
}

impl Appointment {
    /// `HH:MM-HH:MM`, falling back to the start time and duration when the
    /// stored duration runs past midnight.
    pub(crate) fn time_range(&self) -> String {
        match self.interval() {
            Ok(interval) => interval.to_string(),
            Err(_) => format!("{} (+{} min)", ClockTime(self.start_time), self.duration_minutes),
        }
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let service = self.service_name.as_deref().unwrap_or("Appointment");
        writeln!(f, "# {}. {} ({})", self.id, service, self.status.with_icon())?;
        writeln!(f)?;

        writeln!(f, "- Date: {}", self.date)?;
        writeln!(f, "- Time: {} ({} min)", self.time_range(), self.duration_minutes)?;
        writeln!(
            f,
            "- Client: {}",
            named(self.client_name.as_deref(), self.client_id)
        )?;
        writeln!(
            f,
            "- Employee: {}",
            named(self.employee_name.as_deref(), self.employee_id)
        )?;
        writeln!(
            f,
            "- Service: {}",
            named(self.service_name.as_deref(), self.service_id)
        )?;
        writeln!(f, "- Price: {}", self.price)?;
        if let Some(commission) = self.commission_amount {
            writeln!(f, "- Commission: {commission}")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Phone**: {}", self.phone)?;
        writeln!(f, "- **Visits**: {}", self.total_visits)?;
        writeln!(f, "- **Total spent**: {}", self.total_spent)?;
        if let Some(first) = self.first_visit {
            writeln!(f, "- **First visit**: {first}")?;
        }
        if let Some(last) = self.last_visit {
            writeln!(f, "- **Last visit**: {last}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Duration**: {} min", self.duration_minutes)?;
        writeln!(f, "- **Recommended price**: {}", self.recommended_price)?;
        writeln!(f)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;
        if let Some(phone) = &self.phone {
            writeln!(f, "- **Phone**: {phone}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Employee {} earns {}% commission on service {}",
            self.employee_id, self.commission_rate, self.service_id
        )
    }
}

impl fmt::Display for SlotCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_available { "○ free" } else { "● taken" };
        writeln!(
            f,
            "- {}-{} {state}",
            ClockTime(self.start_time),
            ClockTime(self.end_time)
        )
    }
}

impl fmt::Display for AvailableSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {}-{}",
            ClockTime(self.start_time),
            ClockTime(self.end_time)
        )
    }
}

impl fmt::Display for SlotGenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created {} of {} slot(s) for {} employee(s) over {} day(s)",
            self.created, self.requested, self.employees, self.days
        )?;
        let existing = self.requested - self.created;
        if existing > 0 {
            writeln!(f, "{existing} slot(s) already existed and were left unchanged")?;
        }
        Ok(())
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.previous == self.appointment.status {
            writeln!(
                f,
                "Appointment {} is already {}",
                self.appointment.id, self.appointment.status
            )?;
        } else {
            writeln!(
                f,
                "Appointment {} moved from {} to {}",
                self.appointment.id, self.previous, self.appointment.status
            )?;
        }
        match self.effect {
            StatsEffect::RecordVisit => {
                writeln!(f, "Visit recorded for client {}", self.appointment.client_id)?
            }
            StatsEffect::RevokeVisit => {
                writeln!(f, "Visit revoked for client {}", self.appointment.client_id)?
            }
            StatsEffect::None => {}
        }
        writeln!(f)?;
        write!(f, "{}", self.appointment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tests::sample_appointment;

    #[test]
    fn test_appointment_display() {
        let mut appointment = sample_appointment();
        appointment.service_name = Some("Haircut".to_string());
        appointment.employee_name = None;

        let output = appointment.to_string();
        assert!(output.starts_with("# 12. Haircut (○ Scheduled)"));
        assert!(output.contains("- Time: 14:00-15:00 (60 min)"));
        assert!(output.contains("- Client: Ana Souza (ID: 3)"));
        assert!(output.contains("- Employee: ID 1"));
        assert!(output.contains("- Price: 80.00"));
        assert!(output.contains("- Commission: 32.00"));
        assert!(output.contains("Bring reference photo"));
    }

    #[test]
    fn test_generation_summary_reports_existing_cells() {
        let summary = SlotGenerationSummary {
            employees: 1,
            days: 1,
            requested: 20,
            created: 0,
        };
        let output = summary.to_string();
        assert!(output.contains("Created 0 of 20 slot(s)"));
        assert!(output.contains("20 slot(s) already existed"));
    }

    #[test]
    fn test_transition_display() {
        let mut appointment = sample_appointment();
        appointment.status = AppointmentStatus::Completed;
        let transition = Transition {
            appointment,
            previous: AppointmentStatus::Scheduled,
            effect: StatsEffect::RecordVisit,
        };
        let output = transition.to_string();
        assert!(output.contains("moved from scheduled to completed"));
        assert!(output.contains("Visit recorded for client 3"));
    }
}
