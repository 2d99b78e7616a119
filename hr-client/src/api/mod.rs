//! Backend collaborator interfaces
//!
//! One trait per resource. [`crate::HttpClient`] implements them over REST,
//! [`crate::MockBackend`] in memory. Services depend on [`HrBackend`] only.

mod attendance;
mod goals;
mod holidays;
mod roles;

pub use attendance::AttendanceApi;
pub use goals::GoalsApi;
pub use holidays::HolidaysApi;
pub use roles::RolesApi;

/// Every resource the dashboard talks to
pub trait HrBackend: GoalsApi + HolidaysApi + RolesApi + AttendanceApi + Send + Sync {}

impl<T> HrBackend for T where T: GoalsApi + HolidaysApi + RolesApi + AttendanceApi + Send + Sync {}
