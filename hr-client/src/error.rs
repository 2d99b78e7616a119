//! Client error types
//!
//! [`ClientError`] describes what went wrong on the wire. It never reaches a
//! user: services convert it with [`ClientError::into_app_error`], which logs
//! the detail and returns the fixed message for the [`Operation`].

use reqwest::StatusCode;
use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded its timeout
    #[error("Request timed out")]
    Timeout,

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Backend rejected the payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Backend refused because of current state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-2xx response
    #[error("Server error ({status}): {body}")]
    Server { status: u16, body: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Map a non-2xx response
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden(body),
            StatusCode::NOT_FOUND => Self::NotFound(body),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Self::Validation(body),
            StatusCode::CONFLICT => Self::Conflict(body),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => Self::Timeout,
            _ => Self::Server {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// Error code carried by the user-facing error.
    ///
    /// Codes tell callers what happened (a row vanished, the session
    /// expired); the message shown to the user stays the same.
    pub fn code(&self, op: Operation) -> ErrorCode {
        match self {
            Self::Timeout => ErrorCode::TimeoutError,
            Self::Http(e) if e.is_timeout() => ErrorCode::TimeoutError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::InvalidResponse(_) | Self::Serialization(_) => ErrorCode::InvalidResponse,
            Self::Unauthorized => ErrorCode::NotAuthenticated,
            Self::Forbidden(_) => ErrorCode::PermissionDenied,
            Self::NotFound(_) => op.not_found_code(),
            Self::Conflict(_) if op == Operation::SaveRole => ErrorCode::RoleNameExists,
            _ => ErrorCode::NetworkError,
        }
    }

    /// Log the detail and reduce to the fixed message for `op`.
    ///
    /// Not-found and server failures collapse into the same message.
    pub fn into_app_error(self, op: Operation) -> AppError {
        let code = self.code(op);
        tracing::error!(
            operation = op.name(),
            category = code.category().name(),
            code = code.code(),
            error = %self,
            "Request failed"
        );
        AppError::with_message(code, op.user_message()).with_detail("operation", op.name())
    }
}

/// User-visible operation, one fixed failure message each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LoadGoals,
    SaveGoals,
    DeleteGoals,
    SubmitGoals,
    ApproveGoals,
    RejectGoals,
    CompleteReview,
    LoadHolidayLists,
    SaveHolidayList,
    DeleteHolidayList,
    PublishHolidayList,
    ArchiveHolidayList,
    LoadHolidays,
    SaveHoliday,
    DeleteHoliday,
    LoadRoles,
    SaveRole,
    DeleteRole,
    LoadAttendance,
    ClockIn,
    ClockOut,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadGoals => "load_goals",
            Self::SaveGoals => "save_goals",
            Self::DeleteGoals => "delete_goals",
            Self::SubmitGoals => "submit_goals",
            Self::ApproveGoals => "approve_goals",
            Self::RejectGoals => "reject_goals",
            Self::CompleteReview => "complete_review",
            Self::LoadHolidayLists => "load_holiday_lists",
            Self::SaveHolidayList => "save_holiday_list",
            Self::DeleteHolidayList => "delete_holiday_list",
            Self::PublishHolidayList => "publish_holiday_list",
            Self::ArchiveHolidayList => "archive_holiday_list",
            Self::LoadHolidays => "load_holidays",
            Self::SaveHoliday => "save_holiday",
            Self::DeleteHoliday => "delete_holiday",
            Self::LoadRoles => "load_roles",
            Self::SaveRole => "save_role",
            Self::DeleteRole => "delete_role",
            Self::LoadAttendance => "load_attendance",
            Self::ClockIn => "clock_in",
            Self::ClockOut => "clock_out",
        }
    }

    /// Code for a 404 answered to this operation
    pub fn not_found_code(&self) -> ErrorCode {
        match self {
            Self::LoadGoals
            | Self::SaveGoals
            | Self::DeleteGoals
            | Self::SubmitGoals
            | Self::ApproveGoals
            | Self::RejectGoals
            | Self::CompleteReview => ErrorCode::GoalsGroupNotFound,
            Self::LoadHolidayLists
            | Self::SaveHolidayList
            | Self::DeleteHolidayList
            | Self::PublishHolidayList
            | Self::ArchiveHolidayList
            | Self::LoadHolidays => ErrorCode::HolidayListNotFound,
            Self::SaveHoliday | Self::DeleteHoliday => ErrorCode::HolidayNotFound,
            Self::LoadRoles | Self::SaveRole | Self::DeleteRole => ErrorCode::RoleNotFound,
            Self::LoadAttendance | Self::ClockIn | Self::ClockOut => ErrorCode::NotFound,
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::LoadGoals => "Failed to load goals. Please try again.",
            Self::SaveGoals => "Failed to save goals. Please try again.",
            Self::DeleteGoals => "Failed to delete goals. Please try again.",
            Self::SubmitGoals => "Failed to submit goals. Please try again.",
            Self::ApproveGoals => "Failed to approve goals. Please try again.",
            Self::RejectGoals => "Failed to reject goals. Please try again.",
            Self::CompleteReview => "Failed to complete review. Please try again.",
            Self::LoadHolidayLists => "Failed to load holiday lists. Please try again.",
            Self::SaveHolidayList => "Failed to save holiday list. Please try again.",
            Self::DeleteHolidayList => "Failed to delete holiday list. Please try again.",
            Self::PublishHolidayList => "Failed to publish holiday list. Please try again.",
            Self::ArchiveHolidayList => "Failed to archive holiday list. Please try again.",
            Self::LoadHolidays => "Failed to load holidays. Please try again.",
            Self::SaveHoliday => "Failed to save holiday. Please try again.",
            Self::DeleteHoliday => "Failed to delete holiday. Please try again.",
            Self::LoadRoles => "Failed to load roles. Please try again.",
            Self::SaveRole => "Failed to save role. Please try again.",
            Self::DeleteRole => "Failed to delete role. Please try again.",
            Self::LoadAttendance => "Failed to load attendance status. Please try again.",
            Self::ClockIn => "Failed to clock in. Please try again.",
            Self::ClockOut => "Failed to clock out. Please try again.",
        }
    }
}

/// Attach an [`Operation`] to a client result
pub trait OperationExt<T> {
    fn for_op(self, op: Operation) -> Result<T, AppError>;
}

impl<T> OperationExt<T> for ClientResult<T> {
    fn for_op(self, op: Operation) -> Result<T, AppError> {
        self.map_err(|e| e.into_app_error(op))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ClientError::from_status(StatusCode::NOT_FOUND, "gone".into()),
            ClientError::NotFound(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::CONFLICT, String::new()),
            ClientError::Conflict(_)
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::BAD_GATEWAY, "upstream".into()),
            ClientError::Server { status: 502, .. }
        ));
        assert!(matches!(
            ClientError::from_status(StatusCode::GATEWAY_TIMEOUT, String::new()),
            ClientError::Timeout
        ));
    }

    #[test]
    fn test_not_found_and_server_error_share_message() {
        let a = ClientError::NotFound("goal g1".into()).into_app_error(Operation::LoadGoals);
        let b = ClientError::Server {
            status: 500,
            body: "stack trace".into(),
        }
        .into_app_error(Operation::LoadGoals);
        assert_eq!(a.message, "Failed to load goals. Please try again.");
        assert_eq!(a.message, b.message);
        assert_eq!(a.code, ErrorCode::GoalsGroupNotFound);
        assert_eq!(b.code, ErrorCode::NetworkError);
        assert!(!b.message.contains("stack trace"));
    }

    #[test]
    fn test_timeout_code() {
        let err = ClientError::Timeout.into_app_error(Operation::LoadHolidayLists);
        assert_eq!(err.code, ErrorCode::TimeoutError);
        assert_eq!(err.message, "Failed to load holiday lists. Please try again.");
    }

    #[test]
    fn test_codes_follow_operation() {
        let missing = |op| ClientError::NotFound(String::new()).code(op);
        assert_eq!(missing(Operation::PublishHolidayList), ErrorCode::HolidayListNotFound);
        assert_eq!(missing(Operation::DeleteHoliday), ErrorCode::HolidayNotFound);
        assert_eq!(missing(Operation::DeleteRole), ErrorCode::RoleNotFound);
        assert_eq!(missing(Operation::ClockOut), ErrorCode::NotFound);

        let duplicate = ClientError::Conflict("name taken".into());
        assert_eq!(duplicate.code(Operation::SaveRole), ErrorCode::RoleNameExists);
        assert_eq!(duplicate.code(Operation::ApproveGoals), ErrorCode::NetworkError);

        assert_eq!(
            ClientError::Unauthorized.code(Operation::LoadRoles),
            ErrorCode::NotAuthenticated
        );
        assert_eq!(
            ClientError::Forbidden(String::new()).code(Operation::SaveHoliday),
            ErrorCode::PermissionDenied
        );
    }

    #[test]
    fn test_for_op() {
        let result: ClientResult<()> = Err(ClientError::Unauthorized);
        let err = result.for_op(Operation::ClockIn).unwrap_err();
        assert_eq!(err.message, "Failed to clock in. Please try again.");
        assert_eq!(err.details.unwrap().get("operation").unwrap(), "clock_in");
    }
}
