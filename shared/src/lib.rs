//! Shared types for the HR dashboard
//!
//! Domain models, access control, lifecycle state machines, list queries and
//! the unified error type. Everything here is pure: no I/O, no async.

pub mod error;
pub mod models;
pub mod query;
pub mod rbac;
pub mod validation;
pub mod workflow;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use models::Role;
pub use rbac::{Action, RouteRegistry};
pub use serde::{Deserialize, Serialize};
