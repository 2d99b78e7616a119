//! Workflow services
//!
//! Each service guards an operation client-side (role, lifecycle state,
//! field validation) before touching the backend, then reduces any backend
//! failure to the fixed message for that operation.

pub mod attendance;
pub mod goals;
pub mod holidays;
pub mod roles;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Role;
use shared::rbac::{Action, RouteRegistry};

pub use attendance::AttendanceService;
pub use goals::GoalService;
pub use holidays::{BatchFailure, BatchReport, HolidayService};
pub use roles::RoleService;

/// Require `action` on `resource` for `role` in the built-in registry
pub(crate) fn authorize(role: Role, resource: &str, action: Action) -> AppResult<()> {
    if RouteRegistry::builtin().can(role, resource, action) {
        return Ok(());
    }
    tracing::warn!(role = %role, resource, action = %action, "Action not permitted");
    Err(AppError::with_message(
        ErrorCode::PermissionDenied,
        format!("{role} cannot {action} {resource}"),
    )
    .with_detail("resource", resource)
    .with_detail("action", action.as_str()))
}
