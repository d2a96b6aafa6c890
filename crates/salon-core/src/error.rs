//! Error types for the scheduling library.

use std::path::PathBuf;

use jiff::civil::{Date, Time};
use thiserror::Error;

/// Comprehensive error type for all scheduler operations.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// Database connection, transaction or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Appointment not found for the given ID
    #[error("Appointment with ID {id} not found")]
    AppointmentNotFound { id: u64 },
    /// Client not found for the given ID
    #[error("Client with ID {id} not found")]
    ClientNotFound { id: u64 },
    /// Service not found for the given ID
    #[error("Service with ID {id} not found")]
    ServiceNotFound { id: u64 },
    /// Employee not found for the given ID
    #[error("Employee with ID {id} not found")]
    EmployeeNotFound { id: u64 },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The proposed interval overlaps an existing non-canceled appointment
    #[error("Time conflict with appointment {appointment_id}")]
    TimeConflict { appointment_id: u64 },
    /// The slot cell at the requested start time is already occupied
    #[error("Slot {date} {start_time} is already taken for employee {employee_id}")]
    SlotTaken {
        employee_id: u64,
        date: Date,
        start_time: Time,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of errors, used by outer surfaces to pick a
/// response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unresolvable input; nothing was written.
    Validation,
    /// Double booking or an occupied slot; the transaction was rolled back.
    Conflict,
    /// The addressed entity does not exist.
    NotFound,
    /// Storage or runtime failure; safe to retry the whole operation.
    Storage,
}

impl ErrorKind {
    /// HTTP status code conventionally associated with this kind.
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::Validation => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::NotFound => 404,
            ErrorKind::Storage => 500,
        }
    }
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> SchedulerError {
        SchedulerError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> SchedulerError {
        SchedulerError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl SchedulerError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Classifies the error for callers that map it onto a protocol.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SchedulerError::InvalidInput { .. } => ErrorKind::Validation,
            SchedulerError::TimeConflict { .. } | SchedulerError::SlotTaken { .. } => {
                ErrorKind::Conflict
            }
            SchedulerError::AppointmentNotFound { .. }
            | SchedulerError::ClientNotFound { .. }
            | SchedulerError::ServiceNotFound { .. }
            | SchedulerError::EmployeeNotFound { .. } => ErrorKind::NotFound,
            SchedulerError::Database { .. }
            | SchedulerError::FileSystem { .. }
            | SchedulerError::XdgDirectory(_)
            | SchedulerError::Configuration { .. } => ErrorKind::Storage,
        }
    }

    /// Returns true for double-booking and occupied-slot rejections.
    pub fn is_conflict(&self) -> bool {
        self.kind() == ErrorKind::Conflict
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| SchedulerError::database(message).with_source(e))
    }
}

/// Result type alias for scheduler operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_status_codes() {
        let conflict = SchedulerError::TimeConflict { appointment_id: 3 };
        assert_eq!(conflict.kind(), ErrorKind::Conflict);
        assert_eq!(conflict.kind().status_code(), 409);
        assert!(conflict.is_conflict());

        let invalid = SchedulerError::invalid_input("service_id").with_reason("unknown service 9");
        assert_eq!(invalid.kind().status_code(), 400);
        assert!(!invalid.is_conflict());

        let missing = SchedulerError::AppointmentNotFound { id: 42 };
        assert_eq!(missing.kind().status_code(), 404);
        assert_eq!(missing.to_string(), "Appointment with ID 42 not found");

        let storage = SchedulerError::database("Failed to begin transaction")
            .with_source(rusqlite::Error::InvalidQuery);
        assert_eq!(storage.kind(), ErrorKind::Storage);
        assert_eq!(storage.kind().status_code(), 500);
    }

    #[test]
    fn test_slot_taken_message() {
        let err = SchedulerError::SlotTaken {
            employee_id: 2,
            date: jiff::civil::date(2026, 3, 14),
            start_time: jiff::civil::time(9, 30, 0, 0),
        };
        let message = err.to_string();
        assert!(message.contains("2026-03-14"));
        assert!(message.contains("09:30"));
        assert!(err.is_conflict());
    }
}
