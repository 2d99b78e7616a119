//! Goals group lifecycle
//!
//! ```text
//! DRAFT ──submit──▶ SUBMITTED ──approve──▶ APPROVED ┄┄▶ IN_PROGRESS ┄┄▶ REVIEW_PENDING
//!   ▲                   │                                                   │
//!   └──reopen── REJECTED ◀──reject──┘                        complete_review │
//!                                                                           ▼
//!                                                                       COMPLETED
//! ```
//! Dotted edges are driven by the backend; the client never requests them.

use serde::{Deserialize, Serialize};

use super::StatusBadge;
use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{GoalStatus, Role};

const EMPLOYEE: &[Role] = &[Role::Employee];
const REVIEWERS: &[Role] = &[Role::Manager, Role::Admin];

/// Client-initiated goal workflow action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalAction {
    Submit,
    Approve,
    Reject,
    CompleteReview,
    /// Implicit: saving a rejected group returns it to draft
    Reopen,
}

impl GoalAction {
    pub const ALL: [GoalAction; 5] = [
        GoalAction::Submit,
        GoalAction::Approve,
        GoalAction::Reject,
        GoalAction::CompleteReview,
        GoalAction::Reopen,
    ];

    pub fn from_status(&self) -> GoalStatus {
        match self {
            Self::Submit => GoalStatus::Draft,
            Self::Approve | Self::Reject => GoalStatus::Submitted,
            Self::CompleteReview => GoalStatus::ReviewPending,
            Self::Reopen => GoalStatus::Rejected,
        }
    }

    pub fn to_status(&self) -> GoalStatus {
        match self {
            Self::Submit => GoalStatus::Submitted,
            Self::Approve => GoalStatus::Approved,
            Self::Reject => GoalStatus::Rejected,
            Self::CompleteReview => GoalStatus::Completed,
            Self::Reopen => GoalStatus::Draft,
        }
    }

    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::Submit | Self::Reopen => EMPLOYEE,
            Self::Approve | Self::Reject | Self::CompleteReview => REVIEWERS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Submit => "Submit for approval",
            Self::Approve => "Approve",
            Self::Reject => "Reject",
            Self::CompleteReview => "Complete review",
            Self::Reopen => "Edit goals",
        }
    }

    /// Manager comments typed in the review form are saved before these run
    pub fn persists_pending_comments(&self) -> bool {
        matches!(self, Self::Approve | Self::CompleteReview)
    }
}

impl GoalStatus {
    /// Actions `role` can trigger from this status
    pub fn available_actions(&self, role: Role) -> Vec<GoalAction> {
        GoalAction::ALL
            .into_iter()
            .filter(|a| a.from_status() == *self && a.allowed_roles().contains(&role))
            .collect()
    }

    /// Apply `action` as `role`, returning the new status
    pub fn transition(self, action: GoalAction, role: Role) -> AppResult<GoalStatus> {
        if action.from_status() != self {
            return Err(AppError::with_message(
                ErrorCode::GoalTransitionNotAllowed,
                format!("Cannot {} from status {}", action.label().to_lowercase(), self.as_str()),
            )
            .with_detail("status", self.as_str())
            .with_detail("action", action.label()));
        }
        if !action.allowed_roles().contains(&role) {
            return Err(AppError::with_message(
                ErrorCode::RoleRequired,
                format!("{} cannot {}", role, action.label().to_lowercase()),
            )
            .with_detail("role", role.as_str()));
        }
        tracing::debug!(from = self.as_str(), to = action.to_status().as_str(), role = %role, "Goal transition");
        Ok(action.to_status())
    }

    /// Successor reached through backend processes, not client actions
    pub fn server_driven_successor(&self) -> Option<GoalStatus> {
        match self {
            Self::Approved => Some(Self::InProgress),
            Self::InProgress => Some(Self::ReviewPending),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Name, description, date, completion, type and employee comments
    pub fn can_edit_goal_fields(&self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }

    pub fn can_edit_manager_comments(&self) -> bool {
        matches!(self, Self::Submitted | Self::ReviewPending)
    }

    pub fn badge(&self) -> StatusBadge {
        use super::BadgeTone::*;
        match self {
            Self::Draft => StatusBadge::new("Draft", Neutral),
            Self::Submitted => StatusBadge::new("Pending Approval", Warning),
            Self::Approved => StatusBadge::new("Approved", Success),
            Self::InProgress => StatusBadge::new("In Progress", Info),
            Self::ReviewPending => StatusBadge::new("Review Pending", Warning),
            Self::Completed => StatusBadge::new("Completed", Success),
            Self::Rejected => StatusBadge::new("Rejected", Danger),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let status = GoalStatus::Draft
            .transition(GoalAction::Submit, Role::Employee)
            .unwrap();
        assert_eq!(status, GoalStatus::Submitted);
        let status = status.transition(GoalAction::Approve, Role::Manager).unwrap();
        assert_eq!(status, GoalStatus::Approved);
        assert_eq!(status.server_driven_successor(), Some(GoalStatus::InProgress));
        assert_eq!(
            GoalStatus::InProgress.server_driven_successor(),
            Some(GoalStatus::ReviewPending)
        );
        let status = GoalStatus::ReviewPending
            .transition(GoalAction::CompleteReview, Role::Admin)
            .unwrap();
        assert!(status.is_terminal());
        assert!(status.available_actions(Role::Admin).is_empty());
    }

    #[test]
    fn test_reject_and_reopen() {
        let status = GoalStatus::Submitted
            .transition(GoalAction::Reject, Role::Admin)
            .unwrap();
        assert_eq!(status, GoalStatus::Rejected);
        assert!(!status.is_terminal());
        assert_eq!(
            status.transition(GoalAction::Reopen, Role::Employee).unwrap(),
            GoalStatus::Draft
        );
    }

    #[test]
    fn test_wrong_status_is_refused() {
        let err = GoalStatus::Approved
            .transition(GoalAction::Submit, Role::Employee)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::GoalTransitionNotAllowed);
        assert_eq!(err.message, "Cannot submit for approval from status APPROVED");
    }

    #[test]
    fn test_wrong_role_is_refused() {
        let err = GoalStatus::Submitted
            .transition(GoalAction::Approve, Role::Employee)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RoleRequired);
        assert!(GoalStatus::Submitted
            .transition(GoalAction::Approve, Role::Hr)
            .is_err());
        assert!(GoalStatus::Draft
            .transition(GoalAction::Submit, Role::Manager)
            .is_err());
    }

    #[test]
    fn test_no_client_transition_out_of_approved_or_in_progress() {
        for role in Role::ALL {
            assert!(GoalStatus::Approved.available_actions(role).is_empty());
            assert!(GoalStatus::InProgress.available_actions(role).is_empty());
        }
    }

    #[test]
    fn test_available_actions_per_role() {
        assert_eq!(
            GoalStatus::Submitted.available_actions(Role::Manager),
            vec![GoalAction::Approve, GoalAction::Reject]
        );
        assert!(GoalStatus::Submitted.available_actions(Role::Employee).is_empty());
        assert_eq!(
            GoalStatus::Draft.available_actions(Role::Employee),
            vec![GoalAction::Submit]
        );
        assert_eq!(
            GoalStatus::ReviewPending.available_actions(Role::Admin),
            vec![GoalAction::CompleteReview]
        );
    }

    #[test]
    fn test_editability_rules() {
        for status in GoalStatus::ALL {
            let fields = matches!(status, GoalStatus::Draft | GoalStatus::Rejected);
            let comments = matches!(status, GoalStatus::Submitted | GoalStatus::ReviewPending);
            assert_eq!(status.can_edit_goal_fields(), fields, "{status:?}");
            assert_eq!(status.can_edit_manager_comments(), comments, "{status:?}");
        }
    }

    #[test]
    fn test_badges() {
        assert_eq!(GoalStatus::Submitted.badge().label, "Pending Approval");
        assert_eq!(GoalStatus::Rejected.badge().tone, super::super::BadgeTone::Danger);
    }
}
