//! One-line feedback for commands that produce no resource to show.

use std::fmt;

/// Outcome line printed after a command such as setting a commission rate
/// or looking up a client that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    Success(String),
    Failure(String),
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        OperationStatus::Success(message.into())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        OperationStatus::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OperationStatus::Success(_))
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationStatus::Success(message) => writeln!(f, "Success: {message}"),
            OperationStatus::Failure(message) => writeln!(f, "Error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_status_display() {
        let success = OperationStatus::success("Employee 1 earns 40% commission on service 2");
        assert!(success.is_success());
        assert_eq!(
            success.to_string(),
            "Success: Employee 1 earns 40% commission on service 2\n"
        );

        let failure = OperationStatus::failure(format!("No client with phone {}", "555-0101"));
        assert!(!failure.is_success());
        assert_eq!(failure.to_string(), "Error: No client with phone 555-0101\n");
    }
}
