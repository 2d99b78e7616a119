//! Holiday list lifecycle
//!
//! `DRAFT ──publish──▶ PUBLISHED ──archive──▶ ARCHIVED`, no way back.
//! Publishing needs at least one holiday; archived lists are frozen.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{BadgeTone, StatusBadge};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{HolidayList, HolidayStatus};

/// Action on a holiday list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayAction {
    Publish,
    Archive,
    Edit,
    Delete,
    AddHoliday,
}

/// Which actions a list currently allows (drives button state)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayActions {
    pub publish: bool,
    pub archive: bool,
    pub edit: bool,
    pub delete: bool,
    pub add_holiday: bool,
}

impl HolidayAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Archive => "archive",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::AddHoliday => "add holidays to",
        }
    }
}

impl fmt::Display for HolidayAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl HolidayStatus {
    /// Check `action` against this status and the current holiday count
    pub fn check(&self, action: HolidayAction, holiday_count: usize) -> AppResult<()> {
        match (action, self) {
            (HolidayAction::Publish, HolidayStatus::Draft) if holiday_count == 0 => {
                Err(AppError::new(ErrorCode::HolidayListEmpty))
            }
            (HolidayAction::Publish, HolidayStatus::Draft) => Ok(()),
            (HolidayAction::Archive, HolidayStatus::Published) => Ok(()),
            (HolidayAction::Publish | HolidayAction::Archive, status) => {
                Err(AppError::with_message(
                    ErrorCode::HolidayTransitionNotAllowed,
                    format!("Cannot {} a holiday list in status {}", action, status.as_str()),
                )
                .with_detail("status", status.as_str()))
            }
            (_, HolidayStatus::Archived) => Err(AppError::new(ErrorCode::HolidayListArchived)),
            _ => Ok(()),
        }
    }

    /// Status after a successful transition action
    pub fn after(&self, action: HolidayAction) -> HolidayStatus {
        match (action, self) {
            (HolidayAction::Publish, HolidayStatus::Draft) => HolidayStatus::Published,
            (HolidayAction::Archive, HolidayStatus::Published) => HolidayStatus::Archived,
            _ => *self,
        }
    }

    pub fn badge(&self) -> StatusBadge {
        match self {
            Self::Draft => StatusBadge::new("Draft", BadgeTone::Neutral),
            Self::Published => StatusBadge::new("Published", BadgeTone::Success),
            Self::Archived => StatusBadge::new("Archived", BadgeTone::Muted),
        }
    }
}

impl HolidayList {
    pub fn check(&self, action: HolidayAction) -> AppResult<()> {
        self.status.check(action, self.holidays.len())
    }

    pub fn can(&self, action: HolidayAction) -> bool {
        self.check(action).is_ok()
    }

    pub fn can_publish(&self) -> bool {
        self.can(HolidayAction::Publish)
    }

    pub fn can_archive(&self) -> bool {
        self.can(HolidayAction::Archive)
    }

    pub fn actions(&self) -> HolidayActions {
        HolidayActions {
            publish: self.can(HolidayAction::Publish),
            archive: self.can(HolidayAction::Archive),
            edit: self.can(HolidayAction::Edit),
            delete: self.can(HolidayAction::Delete),
            add_holiday: self.can(HolidayAction::AddHoliday),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Holiday;

    fn list(status: HolidayStatus, holidays: usize) -> HolidayList {
        HolidayList {
            id: "l1".into(),
            name: "India 2025".into(),
            year: 2025,
            description: String::new(),
            status,
            holidays: (0..holidays)
                .map(|i| Holiday {
                    id: format!("h{i}"),
                    name: format!("Holiday {i}"),
                    date: format!("2025-01-{:02}", i + 1),
                    description: String::new(),
                    is_recurring: false,
                    created_at: None,
                    updated_at: None,
                })
                .collect(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_publish_needs_a_holiday() {
        let mut l = list(HolidayStatus::Draft, 0);
        assert!(!l.can_publish());
        assert_eq!(
            l.check(HolidayAction::Publish).unwrap_err().code,
            ErrorCode::HolidayListEmpty
        );

        l = list(HolidayStatus::Draft, 1);
        assert!(l.can_publish());
        assert!(!l.can_archive());
    }

    #[test]
    fn test_archive_needs_published() {
        assert!(list(HolidayStatus::Published, 3).can_archive());
        assert!(!list(HolidayStatus::Published, 3).can_publish());
        assert!(!list(HolidayStatus::Archived, 3).can_archive());
        assert_eq!(
            list(HolidayStatus::Draft, 3)
                .check(HolidayAction::Archive)
                .unwrap_err()
                .code,
            ErrorCode::HolidayTransitionNotAllowed
        );
    }

    #[test]
    fn test_archived_is_frozen() {
        let actions = list(HolidayStatus::Archived, 2).actions();
        assert_eq!(
            actions,
            HolidayActions {
                publish: false,
                archive: false,
                edit: false,
                delete: false,
                add_holiday: false,
            }
        );
        assert_eq!(
            list(HolidayStatus::Archived, 2)
                .check(HolidayAction::Delete)
                .unwrap_err()
                .code,
            ErrorCode::HolidayListArchived
        );
    }

    #[test]
    fn test_draft_and_published_are_editable() {
        for status in [HolidayStatus::Draft, HolidayStatus::Published] {
            let actions = list(status, 0).actions();
            assert!(actions.edit && actions.delete && actions.add_holiday);
        }
    }

    #[test]
    fn test_forward_only() {
        assert_eq!(
            HolidayStatus::Draft.after(HolidayAction::Publish),
            HolidayStatus::Published
        );
        assert_eq!(
            HolidayStatus::Published.after(HolidayAction::Archive),
            HolidayStatus::Archived
        );
        assert_eq!(
            HolidayStatus::Archived.after(HolidayAction::Publish),
            HolidayStatus::Archived
        );
        assert_eq!(
            HolidayStatus::Published.after(HolidayAction::Publish),
            HolidayStatus::Published
        );
    }

    #[test]
    fn test_transition_error_message() {
        let err = HolidayStatus::Archived.check(HolidayAction::Publish, 4).unwrap_err();
        assert_eq!(err.message, "Cannot publish a holiday list in status ARCHIVED");
    }
}
