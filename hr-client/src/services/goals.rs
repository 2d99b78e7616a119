//! Goals workflow
//!
//! Every transition is checked against [`GoalStatus::transition`] before a
//! request is made. Guard failures never reach the backend.

use std::sync::Arc;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Goal, GoalStatus, GoalsGroup, GoalsGroupPayload, Role};
use shared::query::{GoalsQuery, Page};
use shared::rbac::Action;
use shared::workflow::GoalAction;

use super::authorize;
use crate::api::{GoalsApi, HrBackend};
use crate::error::{Operation, OperationExt};

const RESOURCE: &str = "goals";

/// Goals workflow for one signed-in role
#[derive(Clone)]
pub struct GoalService {
    backend: Arc<dyn HrBackend>,
    role: Role,
}

impl GoalService {
    pub fn new(backend: Arc<dyn HrBackend>, role: Role) -> Self {
        Self { backend, role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub async fn list(&self, query: &GoalsQuery) -> AppResult<Page<GoalsGroup>> {
        let groups = self.backend.list_goals().await.for_op(Operation::LoadGoals)?;
        Ok(query.apply(&groups))
    }

    pub async fn get(&self, id: &str) -> AppResult<GoalsGroup> {
        self.backend.get_goals(id).await.for_op(Operation::LoadGoals)
    }

    /// Create or update the group.
    ///
    /// Only DRAFT and REJECTED groups are editable; saving a REJECTED group
    /// also moves it back to DRAFT.
    pub async fn save(&self, group: &GoalsGroup) -> AppResult<GoalsGroup> {
        if !group.status.can_edit_goal_fields() {
            return Err(AppError::new(ErrorCode::GoalsGroupNotEditable)
                .with_detail("status", group.status.as_str()));
        }
        let reopen = group.status == GoalStatus::Rejected;
        if reopen {
            group.status.transition(GoalAction::Reopen, self.role)?;
        }
        group.validate()?;

        let mut payload = GoalsGroupPayload::from(group);
        let Some(id) = group.id.as_deref().filter(|id| !id.is_empty()) else {
            authorize(self.role, RESOURCE, Action::Create)?;
            for goal in &mut payload.goals {
                goal.manager_comments.clear();
            }
            let created = self
                .backend
                .create_goals(&GoalsGroupPayload {
                    status: GoalStatus::Draft,
                    ..payload
                })
                .await
                .for_op(Operation::SaveGoals)?;
            tracing::info!(id = ?created.id, "Goals group created");
            return Ok(created);
        };

        authorize(self.role, RESOURCE, Action::Edit)?;
        // Reviewer comments are read-only here; keep whatever is stored
        let stored = self.backend.get_goals(id).await.for_op(Operation::SaveGoals)?;
        for goal in &mut payload.goals {
            goal.manager_comments = Self::matching_goal(&stored.goals, goal)
                .map(|g| g.manager_comments.clone())
                .unwrap_or_default();
        }
        let updated = self
            .backend
            .update_goals(id, &payload)
            .await
            .for_op(Operation::SaveGoals)?;
        if !reopen {
            tracing::info!(id, "Goals group updated");
            return Ok(updated);
        }
        let reopened = self
            .backend
            .patch_goals_status(id, GoalStatus::Draft)
            .await
            .for_op(Operation::SaveGoals)?;
        tracing::info!(id, "Rejected goals group reopened as draft");
        Ok(reopened)
    }

    /// Submit for approval; the group must have been saved first
    pub async fn submit(&self, group: &GoalsGroup) -> AppResult<GoalsGroup> {
        let id = Self::persisted_id(group)?;
        group.status.transition(GoalAction::Submit, self.role)?;
        let submitted = self
            .backend
            .submit_goals(id)
            .await
            .for_op(Operation::SubmitGoals)?;
        tracing::info!(id, "Goals group submitted");
        Ok(submitted)
    }

    /// Save the reviewer's comments then approve
    pub async fn approve(&self, group: &GoalsGroup) -> AppResult<GoalsGroup> {
        self.review(group, GoalAction::Approve, Operation::ApproveGoals)
            .await
    }

    /// Save the reviewer's comments then close the review
    pub async fn complete_review(&self, group: &GoalsGroup) -> AppResult<GoalsGroup> {
        self.review(group, GoalAction::CompleteReview, Operation::CompleteReview)
            .await
    }

    /// Reject with a non-blank reason, stored as the rejection reason
    pub async fn reject(&self, group: &GoalsGroup, comments: &str) -> AppResult<GoalsGroup> {
        let comments = comments.trim();
        if comments.is_empty() {
            return Err(AppError::new(ErrorCode::RejectionReasonRequired));
        }
        let id = Self::persisted_id(group)?;
        group.status.transition(GoalAction::Reject, self.role)?;

        let mut rejected = self
            .backend
            .reject_goals(id, comments)
            .await
            .for_op(Operation::RejectGoals)?;
        rejected.status = GoalStatus::Rejected;
        rejected
            .rejection_reason
            .get_or_insert_with(|| comments.to_string());
        tracing::info!(id, "Goals group rejected");
        Ok(rejected)
    }

    pub async fn delete(&self, group: &GoalsGroup) -> AppResult<()> {
        let id = Self::persisted_id(group)?;
        authorize(self.role, RESOURCE, Action::Delete)?;
        self.backend
            .delete_goals(id)
            .await
            .for_op(Operation::DeleteGoals)?;
        tracing::info!(id, "Goals group deleted");
        Ok(())
    }

    async fn review(
        &self,
        group: &GoalsGroup,
        action: GoalAction,
        op: Operation,
    ) -> AppResult<GoalsGroup> {
        let id = Self::persisted_id(group)?;
        group.status.transition(action, self.role)?;

        if action.persists_pending_comments() && Self::has_manager_comments(group) {
            // Only manager comments are writable in review; everything else
            // comes from the stored group
            let stored = self.backend.get_goals(id).await.for_op(op)?;
            let mut payload = GoalsGroupPayload::from(&stored);
            for goal in &mut payload.goals {
                if let Some(edited) = Self::matching_goal(&group.goals, goal) {
                    goal.manager_comments = edited.manager_comments.trim().to_string();
                }
            }
            self.backend.update_goals(id, &payload).await.for_op(op)?;
            tracing::debug!(id, "Manager comments saved");
        }

        let reviewed = match action {
            GoalAction::CompleteReview => self.backend.complete_goals_review(id).await,
            _ => self.backend.approve_goals(id).await,
        }
        .for_op(op)?;
        tracing::info!(id, to = reviewed.status.as_str(), "Goals review recorded");
        Ok(reviewed)
    }

    fn has_manager_comments(group: &GoalsGroup) -> bool {
        group
            .goals
            .iter()
            .any(|g| !g.manager_comments.trim().is_empty())
    }

    fn matching_goal<'a>(goals: &'a [Goal], goal: &Goal) -> Option<&'a Goal> {
        let id = goal.id.as_deref()?;
        goals.iter().find(|g| g.id.as_deref() == Some(id))
    }

    fn persisted_id(group: &GoalsGroup) -> AppResult<&str> {
        group
            .id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AppError::new(ErrorCode::GoalsGroupNotSaved))
    }
}
