//! Unified error codes for the HR dashboard
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Goal errors
//! - 5xxx: Holiday errors
//! - 6xxx: Role errors
//! - 7xxx: Attendance errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they survive the trip
/// through JSON unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid format
    InvalidFormat = 6,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// A non-view action was granted without view
    PermissionWithoutView = 2003,

    // ==================== 4xxx: Goal ====================
    /// Goals group not found
    GoalsGroupNotFound = 4001,
    /// Goals group has not been saved yet
    GoalsGroupNotSaved = 4002,
    /// Goals group is not editable in its current status
    GoalsGroupNotEditable = 4003,
    /// Status transition not allowed
    GoalTransitionNotAllowed = 4004,
    /// Rejection needs a reason
    RejectionReasonRequired = 4005,
    /// Goals group holds no goals
    GoalsGroupEmpty = 4006,

    // ==================== 5xxx: Holiday ====================
    /// Holiday list not found
    HolidayListNotFound = 5001,
    /// Holiday list is archived
    HolidayListArchived = 5002,
    /// Holiday list has no holidays
    HolidayListEmpty = 5003,
    /// Status transition not allowed
    HolidayTransitionNotAllowed = 5004,
    /// Holiday not found
    HolidayNotFound = 5005,
    /// Holiday list year out of range
    HolidayYearOutOfRange = 5006,
    /// Some holidays of a batch could not be created
    HolidayBatchIncomplete = 5007,

    // ==================== 6xxx: Role ====================
    /// Role not found
    RoleNotFound = 6001,
    /// Role name already exists
    RoleNameExists = 6002,

    // ==================== 7xxx: Attendance ====================
    /// Already clocked in today
    AlreadyClockedIn = 7001,
    /// Clock-out attempted without clock-in
    NotClockedIn = 7002,
    /// Already clocked out today
    AlreadyClockedOut = 7003,
    /// Another attendance request is still outstanding
    RequestInFlight = 7004,

    // ==================== 9xxx: System ====================
    /// Network error
    NetworkError = 9003,
    /// Request timed out
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Response body could not be understood
    InvalidResponse = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::RoleRequired => "A different role is required",
            ErrorCode::PermissionWithoutView => "Granted actions require view permission",

            // Goal
            ErrorCode::GoalsGroupNotFound => "Goals group not found",
            ErrorCode::GoalsGroupNotSaved => "Please save goals first",
            ErrorCode::GoalsGroupNotEditable => "Goals cannot be edited in the current status",
            ErrorCode::GoalTransitionNotAllowed => "Goal status transition not allowed",
            ErrorCode::RejectionReasonRequired => "Please provide a reason for rejection",
            ErrorCode::GoalsGroupEmpty => "Add at least one goal",

            // Holiday
            ErrorCode::HolidayListNotFound => "Holiday list not found",
            ErrorCode::HolidayListArchived => "Archived holiday lists cannot be changed",
            ErrorCode::HolidayListEmpty => "Add at least one holiday before publishing",
            ErrorCode::HolidayTransitionNotAllowed => "Holiday list status transition not allowed",
            ErrorCode::HolidayNotFound => "Holiday not found",
            ErrorCode::HolidayYearOutOfRange => "Year must be between 2000 and 2100",
            ErrorCode::HolidayBatchIncomplete => "Some holidays could not be created",

            // Role
            ErrorCode::RoleNotFound => "Role not found",
            ErrorCode::RoleNameExists => "Role name already exists",

            // Attendance
            ErrorCode::AlreadyClockedIn => "Already clocked in",
            ErrorCode::NotClockedIn => "Clock in before clocking out",
            ErrorCode::AlreadyClockedOut => "Already clocked out",
            ErrorCode::RequestInFlight => "A request is already in progress",

            // System
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Request timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::InvalidResponse => "Invalid response from server",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            6 => Ok(ErrorCode::InvalidFormat),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::RoleRequired),
            2003 => Ok(ErrorCode::PermissionWithoutView),

            // Goal
            4001 => Ok(ErrorCode::GoalsGroupNotFound),
            4002 => Ok(ErrorCode::GoalsGroupNotSaved),
            4003 => Ok(ErrorCode::GoalsGroupNotEditable),
            4004 => Ok(ErrorCode::GoalTransitionNotAllowed),
            4005 => Ok(ErrorCode::RejectionReasonRequired),
            4006 => Ok(ErrorCode::GoalsGroupEmpty),

            // Holiday
            5001 => Ok(ErrorCode::HolidayListNotFound),
            5002 => Ok(ErrorCode::HolidayListArchived),
            5003 => Ok(ErrorCode::HolidayListEmpty),
            5004 => Ok(ErrorCode::HolidayTransitionNotAllowed),
            5005 => Ok(ErrorCode::HolidayNotFound),
            5006 => Ok(ErrorCode::HolidayYearOutOfRange),
            5007 => Ok(ErrorCode::HolidayBatchIncomplete),

            // Role
            6001 => Ok(ErrorCode::RoleNotFound),
            6002 => Ok(ErrorCode::RoleNameExists),

            // Attendance
            7001 => Ok(ErrorCode::AlreadyClockedIn),
            7002 => Ok(ErrorCode::NotClockedIn),
            7003 => Ok(ErrorCode::AlreadyClockedOut),
            7004 => Ok(ErrorCode::RequestInFlight),

            // System
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),
            9006 => Ok(ErrorCode::InvalidResponse),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
