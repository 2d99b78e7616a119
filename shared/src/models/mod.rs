//! Data models
//!
//! Wire types exchanged with the HR backend. JSON fields are camelCase,
//! enumerations SCREAMING_SNAKE_CASE. IDs are backend-assigned strings.

pub mod attendance;
pub mod goal;
pub mod holiday;
pub mod role;

// Re-exports
pub use attendance::*;
pub use goal::*;
pub use holiday::*;
pub use role::*;
