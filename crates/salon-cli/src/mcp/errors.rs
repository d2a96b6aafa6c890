//! Error handling utilities for the MCP server

use rmcp::ErrorData;
use salon_core::{ErrorKind, SchedulerError};

/// Maps a scheduler error onto the MCP error code matching its kind.
///
/// Validation failures and booking conflicts are reported as invalid
/// parameters so the caller can correct and retry; storage failures are
/// internal errors.
pub fn to_mcp_error(message: &str, error: &SchedulerError) -> ErrorData {
    let text = format!("{message}: {error}");
    match error.kind() {
        ErrorKind::Validation | ErrorKind::Conflict => ErrorData::invalid_params(text, None),
        ErrorKind::NotFound => ErrorData::resource_not_found(text, None),
        ErrorKind::Storage => ErrorData::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_error_codes_follow_kind() {
        let conflict = to_mcp_error(
            "Failed to book appointment",
            &SchedulerError::TimeConflict { appointment_id: 7 },
        );
        assert_eq!(conflict.code, ErrorCode::INVALID_PARAMS);
        assert!(conflict.message.contains("appointment 7"));

        let missing = to_mcp_error(
            "Failed to show appointment",
            &SchedulerError::AppointmentNotFound { id: 3 },
        );
        assert_eq!(missing.code, ErrorCode::RESOURCE_NOT_FOUND);

        let storage = to_mcp_error(
            "Failed to list",
            &SchedulerError::Configuration {
                message: "Task join error".to_string(),
            },
        );
        assert_eq!(storage.code, ErrorCode::INTERNAL_ERROR);
    }
}
