//! Goal Model
//!
//! A goals group bundles individual goals that share one approval lifecycle.
//! Individual goals carry a status field for the wire format, but the group
//! status is the unit of workflow transition.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_date, validate_optional_text, validate_required_text,
};

/// Goal / goals group status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    #[default]
    Draft,
    Submitted,
    Approved,
    InProgress,
    ReviewPending,
    Completed,
    Rejected,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 7] = [
        GoalStatus::Draft,
        GoalStatus::Submitted,
        GoalStatus::Approved,
        GoalStatus::InProgress,
        GoalStatus::ReviewPending,
        GoalStatus::Completed,
        GoalStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::Approved => "APPROVED",
            Self::InProgress => "IN_PROGRESS",
            Self::ReviewPending => "REVIEW_PENDING",
            Self::Completed => "COMPLETED",
            Self::Rejected => "REJECTED",
        }
    }
}

/// Goal scope
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    #[default]
    Individual,
    Team,
    Organizational,
}

/// Single goal record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Target date (YYYY-MM-DD)
    #[serde(default)]
    pub accomplishment_date: String,
    #[serde(default)]
    pub employee_comments: String,
    #[serde(default)]
    pub manager_comments: String,
    /// 0..=100
    #[serde(default)]
    pub completion_percentage: u8,
    #[serde(default)]
    pub goal_type: GoalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Goal {
    /// Blank entry as shown in a fresh form row
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn validate(&self, index: usize) -> AppResult<()> {
        let field = |name: &str| format!("Goal {} {}", index + 1, name);
        validate_required_text(&self.name, &field("name"), MAX_NAME_LEN)?;
        validate_optional_text(&self.description, &field("description"), MAX_NOTE_LEN)?;
        validate_optional_text(&self.employee_comments, &field("employee comments"), MAX_NOTE_LEN)?;
        validate_optional_text(&self.manager_comments, &field("manager comments"), MAX_NOTE_LEN)?;
        if self.completion_percentage > 100 {
            return Err(AppError::out_of_range(
                field("completion percentage"),
                format!(
                    "{} must be between 0 and 100, got {}",
                    field("completion percentage"),
                    self.completion_percentage
                ),
            ));
        }
        if !self.accomplishment_date.is_empty() {
            validate_date(&self.accomplishment_date, &field("accomplishment date"))?;
        }
        Ok(())
    }
}

/// Goals group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsGroup {
    /// Absent until the group has been saved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub status: GoalStatus,
    /// Reason given by the reviewer on rejection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl GoalsGroup {
    /// A fresh unsaved group: DRAFT with one blank goal
    pub fn new_draft() -> Self {
        Self {
            status: GoalStatus::Draft,
            goals: vec![Goal::empty()],
            ..Default::default()
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Append a blank goal row
    pub fn add_goal(&mut self) {
        self.goals.push(Goal::empty());
    }

    /// Remove a goal row; the last remaining row is kept
    pub fn remove_goal(&mut self, index: usize) -> bool {
        if self.goals.len() <= 1 || index >= self.goals.len() {
            return false;
        }
        self.goals.remove(index);
        true
    }

    /// Field-level validation run before any save
    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.name, "Group name", MAX_NAME_LEN)?;
        validate_optional_text(&self.description, "Group description", MAX_NOTE_LEN)?;
        if self.goals.is_empty() {
            return Err(AppError::new(ErrorCode::GoalsGroupEmpty));
        }
        for (i, goal) in self.goals.iter().enumerate() {
            goal.validate(i)?;
        }
        Ok(())
    }

    /// Average completion across all goals
    pub fn completion(&self) -> u8 {
        if self.goals.is_empty() {
            return 0;
        }
        let total: u32 = self.goals.iter().map(|g| g.completion_percentage as u32).sum();
        (total / self.goals.len() as u32) as u8
    }
}

/// Create / full-update payload for `POST /goals` and `PUT /goals/:id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsGroupPayload {
    pub name: String,
    pub description: String,
    pub goals: Vec<Goal>,
    pub status: GoalStatus,
}

impl From<&GoalsGroup> for GoalsGroupPayload {
    fn from(group: &GoalsGroup) -> Self {
        Self {
            name: group.name.clone(),
            description: group.description.clone(),
            goals: group.goals.clone(),
            status: group.status,
        }
    }
}

/// Body of `PATCH /goals/:id/status`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusPatch {
    pub status: GoalStatus,
}

/// Body of `POST /goals/:id/reject`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectRequest {
    pub comments: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_has_one_blank_goal() {
        let group = GoalsGroup::new_draft();
        assert_eq!(group.status, GoalStatus::Draft);
        assert!(!group.is_persisted());
        assert_eq!(group.goals.len(), 1);
        assert_eq!(group.goals[0].completion_percentage, 0);
        assert_eq!(group.goals[0].goal_type, GoalType::Individual);
        assert!(group.goals[0].name.is_empty());
    }

    #[test]
    fn test_remove_goal_keeps_last_row() {
        let mut group = GoalsGroup::new_draft();
        assert!(!group.remove_goal(0));
        group.add_goal();
        assert!(group.remove_goal(1));
        assert_eq!(group.goals.len(), 1);
        assert!(!group.remove_goal(5));
    }

    #[test]
    fn test_validate_requires_names() {
        let mut group = GoalsGroup::new_draft();
        let err = group.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        group.name = "H1 goals".into();
        let err = group.validate().unwrap_err();
        assert!(err.message.contains("Goal 1 name"));

        group.goals[0].name = "Ship the payroll export".into();
        assert!(group.validate().is_ok());
    }

    #[test]
    fn test_validate_completion_range_and_date() {
        let mut group = GoalsGroup::new_draft();
        group.name = "Q3".into();
        group.goals[0].name = "Mentoring".into();
        group.goals[0].completion_percentage = 101;
        assert_eq!(group.validate().unwrap_err().code, ErrorCode::ValueOutOfRange);

        group.goals[0].completion_percentage = 100;
        group.goals[0].accomplishment_date = "2024-13-01".into();
        assert_eq!(group.validate().unwrap_err().code, ErrorCode::InvalidFormat);

        group.goals[0].accomplishment_date = "2024-12-01".into();
        assert!(group.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_group() {
        let group = GoalsGroup {
            name: "Empty".into(),
            ..Default::default()
        };
        assert_eq!(group.validate().unwrap_err().code, ErrorCode::GoalsGroupEmpty);
    }

    #[test]
    fn test_completion_average() {
        let mut group = GoalsGroup::new_draft();
        group.add_goal();
        group.goals[0].completion_percentage = 50;
        group.goals[1].completion_percentage = 100;
        assert_eq!(group.completion(), 75);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let mut group = GoalsGroup::new_draft();
        group.name = "Growth".into();
        group.goals[0].goal_type = GoalType::Team;
        let json = serde_json::to_value(&group).unwrap();
        assert_eq!(json["status"], "DRAFT");
        assert_eq!(json["goals"][0]["goalType"], "TEAM");
        assert_eq!(json["goals"][0]["completionPercentage"], 0);
        assert!(json.get("id").is_none());

        let status: GoalStatus = serde_json::from_str("\"REVIEW_PENDING\"").unwrap();
        assert_eq!(status, GoalStatus::ReviewPending);
    }
}
