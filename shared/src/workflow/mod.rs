//! Lifecycle state machines
//!
//! One description per lifecycle, shared by list, review and detail views:
//! allowed transitions, who may trigger them, which fields stay editable and
//! the badge shown for each status.

pub mod goal;
pub mod holiday;

use serde::Serialize;

pub use goal::GoalAction;
pub use holiday::{HolidayAction, HolidayActions};

/// Colour family of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
    Muted,
}

/// Display metadata for a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBadge {
    pub label: &'static str,
    pub tone: BadgeTone,
}

impl StatusBadge {
    pub const fn new(label: &'static str, tone: BadgeTone) -> Self {
        Self { label, tone }
    }
}
