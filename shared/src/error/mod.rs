//! Unified error system for the HR dashboard
//!
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Error type with codes, user-facing message, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Goal errors
//! - 5xxx: Holiday errors
//! - 6xxx: Role errors
//! - 7xxx: Attendance errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::GoalsGroupNotSaved);
//! assert_eq!(err.message, "Please save goals first");
//!
//! let err = AppError::validation("Missing required field")
//!     .with_detail("field", "name");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! ```

mod category;
mod codes;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
