//! Result wrapper types for displaying operation outcomes.

use std::fmt;

use crate::models::{Appointment, Client, Employee, Service};

/// Outcome of a create operation: a confirmation line and the new record.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

/// Resources that can be announced by kind and ID.
pub trait Labeled {
    const KIND: &'static str;

    fn id(&self) -> u64;
}

impl Labeled for Appointment {
    const KIND: &'static str = "appointment";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Labeled for Client {
    const KIND: &'static str = "client";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Labeled for Employee {
    const KIND: &'static str = "employee";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Labeled for Service {
    const KIND: &'static str = "service";

    fn id(&self) -> u64 {
        self.id
    }
}

impl<T: Labeled + fmt::Display> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created {} with ID: {}", T::KIND, self.resource.id())?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of an update operation, optionally listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl UpdateResult<Appointment> {
    /// Describes the differences between two versions of an appointment.
    pub fn between(before: &Appointment, after: Appointment) -> Self {
        let mut changes = Vec::new();
        if before.employee_id != after.employee_id {
            changes.push(format!(
                "Employee {} → {}",
                before.employee_id, after.employee_id
            ));
        }
        if before.service_id != after.service_id {
            changes.push(format!("Service {} → {}", before.service_id, after.service_id));
        }
        if before.date != after.date || before.start_time != after.start_time {
            changes.push(format!(
                "Moved from {} {} to {} {}",
                before.date,
                before.time_range(),
                after.date,
                after.time_range()
            ));
        }
        if before.client_id != after.client_id {
            changes.push(format!("Client {} → {}", before.client_id, after.client_id));
        }
        if before.status != after.status {
            changes.push(format!("Status {} → {}", before.status, after.status));
        }
        if before.price != after.price {
            changes.push(format!("Price {} → {}", before.price, after.price));
        }
        if before.notes != after.notes {
            changes.push("Notes updated".to_string());
        }
        Self::with_changes(after, changes)
    }
}

impl<T: Labeled + fmt::Display> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {} with ID: {}", T::KIND, self.resource.id())?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Outcome of a delete operation.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<Appointment> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted appointment {} on {} at {} (ID: {})",
            self.resource.service_name.as_deref().unwrap_or("booking"),
            self.resource.date,
            self.resource.time_range(),
            self.resource.id
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::time;

    use super::*;
    use crate::models::tests::sample_appointment;

    #[test]
    fn test_create_result_display() {
        let output = CreateResult::new(sample_appointment()).to_string();
        assert!(output.starts_with("Created appointment with ID: 12\n\n# 12."));
    }

    #[test]
    fn test_update_result_lists_changes() {
        let before = sample_appointment();
        let mut after = sample_appointment();
        after.start_time = time(15, 0, 0, 0);
        after.notes = None;

        let result = UpdateResult::between(&before, after);
        assert_eq!(result.changes.len(), 2);

        let output = result.to_string();
        assert!(output.contains("Moved from 2026-03-14 14:00-15:00 to 2026-03-14 15:00-16:00"));
        assert!(output.contains("- Notes updated"));
    }

    #[test]
    fn test_delete_result_display() {
        let output = DeleteResult::new(sample_appointment()).to_string();
        assert_eq!(
            output,
            "Deleted appointment Coloring on 2026-03-14 at 14:00-15:00 (ID: 12)\n"
        );
    }
}
