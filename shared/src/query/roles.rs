//! Roles list query

use serde::{Deserialize, Serialize};

use super::{DEFAULT_PER_PAGE, Page, SortDirection, contains_ci, normalise_search};
use crate::models::RoleRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RolesQuery {
    pub search: Option<String>,
    pub direction: SortDirection,
    pub page: u32,
    pub per_page: u32,
}

impl Default for RolesQuery {
    fn default() -> Self {
        Self {
            search: None,
            direction: SortDirection::Asc,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl RolesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(&self, search: &str) -> Self {
        Self {
            search: normalise_search(search),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_direction(&self, direction: SortDirection) -> Self {
        Self {
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

    pub fn apply(&self, roles: &[RoleRecord]) -> Page<RoleRecord> {
        let mut matching: Vec<&RoleRecord> = roles
            .iter()
            .filter(|r| {
                self.search.as_deref().is_none_or(|q| {
                    contains_ci(r.name.as_str(), q) || contains_ci(&r.description, q)
                })
            })
            .collect();
        matching.sort_by(|a, b| self.direction.apply(a.name.as_str().cmp(b.name.as_str())));
        Page::from_matching(matching, self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn record(name: Role, description: &str) -> RoleRecord {
        RoleRecord {
            id: name.as_str().to_lowercase(),
            name,
            description: description.to_string(),
            permissions: Vec::new(),
        }
    }

    #[test]
    fn test_search_and_order() {
        let roles = vec![
            record(Role::Manager, "Team leads"),
            record(Role::Admin, "Full access"),
            record(Role::Hr, "People operations"),
        ];
        let all = RolesQuery::new().apply(&roles);
        let names: Vec<Role> = all.items.iter().map(|r| r.name).collect();
        assert_eq!(names, vec![Role::Admin, Role::Hr, Role::Manager]);

        let found = RolesQuery::new().with_search("people").apply(&roles);
        assert_eq!(found.total, 1);
        assert_eq!(found.items[0].name, Role::Hr);

        let desc = RolesQuery::new()
            .with_direction(SortDirection::Desc)
            .apply(&roles);
        assert_eq!(desc.items[0].name, Role::Manager);
    }
}
