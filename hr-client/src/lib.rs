//! HR Client - backend collaborators for the HR dashboard
//!
//! - [`HttpClient`]: REST backend over reqwest
//! - [`MockBackend`]: in-memory backend behind the mock-data toggle
//! - [`services`]: guarded goals, holidays, roles and attendance workflows
//! - [`view`]: cancellable per-view fetch scopes and refresh counters

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod logger;
pub mod mock;
pub mod services;
pub mod view;

pub use api::{AttendanceApi, GoalsApi, HolidaysApi, HrBackend, RolesApi};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, Operation};
pub use http::HttpClient;
pub use mock::MockBackend;
pub use services::{
    AttendanceService, BatchReport, GoalService, HolidayService, RoleService,
};
pub use view::{RefreshCounter, ViewScope};

// Re-export shared types for convenience
pub use shared::error::{AppError, AppResult, ErrorCode};
pub use shared::models::Role;
