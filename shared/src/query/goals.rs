//! Goals list query

use serde::{Deserialize, Serialize};

use super::{DEFAULT_PER_PAGE, Page, SortDirection, contains_ci, normalise_search};
use crate::models::{GoalStatus, GoalsGroup};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalSort {
    #[default]
    Name,
    Status,
    Completion,
    UpdatedAt,
}

/// Filters, sort and page of the goals list view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsQuery {
    pub search: Option<String>,
    pub status: Option<GoalStatus>,
    pub sort: GoalSort,
    pub direction: SortDirection,
    pub page: u32,
    pub per_page: u32,
}

impl Default for GoalsQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            sort: GoalSort::default(),
            direction: SortDirection::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl GoalsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Matches group name, description or any goal name. Resets to page 1.
    pub fn with_search(&self, search: &str) -> Self {
        Self {
            search: normalise_search(search),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_status(&self, status: Option<GoalStatus>) -> Self {
        Self {
            status,
            page: 1,
            ..self.clone()
        }
    }

    /// Sort by `sort`; choosing the current column again flips the direction
    pub fn sorted_by(&self, sort: GoalSort) -> Self {
        let direction = if self.sort == sort {
            self.direction.flipped()
        } else {
            SortDirection::Asc
        };
        Self {
            sort,
            direction,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn with_per_page(&self, per_page: u32) -> Self {
        Self {
            per_page,
            page: 1,
            ..self.clone()
        }
    }

    pub fn matches(&self, group: &GoalsGroup) -> bool {
        if self.status.is_some_and(|s| s != group.status) {
            return false;
        }
        match &self.search {
            None => true,
            Some(q) => {
                contains_ci(&group.name, q)
                    || contains_ci(&group.description, q)
                    || group.goals.iter().any(|g| contains_ci(&g.name, q))
            }
        }
    }

    pub fn apply(&self, groups: &[GoalsGroup]) -> Page<GoalsGroup> {
        let mut matching: Vec<&GoalsGroup> = groups.iter().filter(|g| self.matches(g)).collect();
        matching.sort_by(|a, b| {
            let ordering = match self.sort {
                GoalSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                GoalSort::Status => a.status.as_str().cmp(b.status.as_str()),
                GoalSort::Completion => a.completion().cmp(&b.completion()),
                GoalSort::UpdatedAt => a.updated_at.cmp(&b.updated_at),
            };
            self.direction.apply(ordering)
        });
        Page::from_matching(matching, self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;

    fn group(name: &str, status: GoalStatus, completion: u8) -> GoalsGroup {
        GoalsGroup {
            id: Some(name.to_lowercase()),
            name: name.to_string(),
            status,
            goals: vec![Goal {
                name: format!("{name} goal"),
                completion_percentage: completion,
                ..Goal::empty()
            }],
            ..Default::default()
        }
    }

    fn fixtures() -> Vec<GoalsGroup> {
        vec![
            group("Sales", GoalStatus::Submitted, 40),
            group("Hiring", GoalStatus::Draft, 10),
            group("Onboarding", GoalStatus::Submitted, 90),
        ]
    }

    fn names(page: &Page<GoalsGroup>) -> Vec<&str> {
        page.items.iter().map(|g| g.name.as_str()).collect()
    }

    #[test]
    fn test_builders_do_not_mutate() {
        let base = GoalsQuery::new().with_page(3);
        let filtered = base.with_status(Some(GoalStatus::Draft));
        assert_eq!(base.page, 3);
        assert_eq!(base.status, None);
        assert_eq!(filtered.page, 1);
        assert_eq!(filtered.status, Some(GoalStatus::Draft));
    }

    #[test]
    fn test_filter_and_sort() {
        let data = fixtures();
        let query = GoalsQuery::new()
            .with_status(Some(GoalStatus::Submitted))
            .sorted_by(GoalSort::Completion)
            .sorted_by(GoalSort::Completion);
        assert_eq!(query.direction, SortDirection::Desc);
        let page = query.apply(&data);
        assert_eq!(names(&page), vec!["Onboarding", "Sales"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_search_covers_goal_names() {
        let data = fixtures();
        let page = GoalsQuery::new().with_search("  hiring GOAL ").apply(&data);
        assert_eq!(names(&page), vec!["Hiring"]);
    }

    #[test]
    fn test_apply_is_pure() {
        let data = fixtures();
        let before = data.clone();
        let query = GoalsQuery::new().with_per_page(2);
        let first = query.apply(&data);
        let second = query.apply(&data);
        assert_eq!(first, second);
        assert_eq!(data, before);
        assert_eq!(names(&first), vec!["Hiring", "Onboarding"]);
        assert_eq!(names(&query.with_page(2).apply(&data)), vec!["Sales"]);
    }
}
