//! Route / permission registry
//!
//! Static table of dashboard resources, each carrying the roles allowed per
//! CRUD action. Built once per process and never mutated.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::Action;
use crate::models::Role;
use crate::models::Role::{Admin, Employee, Hr, Manager};

const EVERYONE: &[Role] = &[Admin, Manager, Employee, Hr];
const STAFF: &[Role] = &[Admin, Manager, Hr];
const ADMIN_HR: &[Role] = &[Admin, Hr];
const ADMIN_ONLY: &[Role] = &[Admin];
const NOBODY: &[Role] = &[];

/// Roles allowed per action; `None` means the action exists for nobody
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePermissions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view: Option<Vec<Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create: Option<Vec<Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<Vec<Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Vec<Role>>,
}

impl RoutePermissions {
    pub fn roles(&self, action: Action) -> Option<&[Role]> {
        match action {
            Action::View => self.view.as_deref(),
            Action::Create => self.create.as_deref(),
            Action::Edit => self.edit.as_deref(),
            Action::Delete => self.delete.as_deref(),
        }
    }

    /// Membership test against one action list only
    pub fn allows(&self, role: Role, action: Action) -> bool {
        self.roles(action).is_some_and(|roles| roles.contains(&role))
    }
}

/// One application resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    pub id: String,
    pub path: String,
    pub name: String,
    pub description: String,
    pub permissions: RoutePermissions,
}

impl RouteConfig {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            path: format!("/{id}"),
            id,
            name: name.into(),
            description: description.into(),
            permissions: RoutePermissions::default(),
        }
    }

    /// Set the role list for one action; an empty slice clears it
    pub fn with(mut self, action: Action, roles: &[Role]) -> Self {
        let list = (!roles.is_empty()).then(|| roles.to_vec());
        match action {
            Action::View => self.permissions.view = list,
            Action::Create => self.permissions.create = list,
            Action::Edit => self.permissions.edit = list,
            Action::Delete => self.permissions.delete = list,
        }
        self
    }

    fn crud(
        self,
        view: &[Role],
        create: &[Role],
        edit: &[Role],
        delete: &[Role],
    ) -> Self {
        self.with(Action::View, view)
            .with(Action::Create, create)
            .with(Action::Edit, edit)
            .with(Action::Delete, delete)
    }
}

/// Insertion-ordered route table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteRegistry {
    routes: Vec<RouteConfig>,
}

static BUILTIN: OnceLock<RouteRegistry> = OnceLock::new();

impl RouteRegistry {
    pub fn new(routes: Vec<RouteConfig>) -> Self {
        Self { routes }
    }

    /// The dashboard's route table
    pub fn builtin() -> &'static RouteRegistry {
        BUILTIN.get_or_init(|| Self::new(builtin_routes()))
    }

    pub fn get_route_config(&self, id: &str) -> Option<&RouteConfig> {
        let route = self.routes.iter().find(|r| r.id == id);
        if route.is_none() {
            tracing::debug!(route_id = %id, "Route not found in registry");
        }
        route
    }

    pub fn get_all_routes(&self) -> &[RouteConfig] {
        &self.routes
    }

    /// Every route whose `view` list contains `role`
    pub fn get_authorized_routes(&self, role: Role) -> Vec<&RouteConfig> {
        let authorized: Vec<&RouteConfig> = self
            .routes
            .iter()
            .filter(|r| r.permissions.allows(role, Action::View))
            .collect();
        tracing::debug!(
            role = %role,
            authorized = authorized.len(),
            total = self.routes.len(),
            "Resolved authorized routes"
        );
        authorized
    }

    /// Whether `role` may perform `action` on route `id`; unknown ids deny
    pub fn can(&self, role: Role, id: &str, action: Action) -> bool {
        self.get_route_config(id)
            .is_some_and(|r| r.permissions.allows(role, action))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn builtin_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig::new("dashboard", "Dashboard", "Overview of key HR metrics")
            .crud(EVERYONE, NOBODY, NOBODY, NOBODY),
        RouteConfig::new("employees", "Employees", "Employee directory and records")
            .crud(STAFF, ADMIN_HR, ADMIN_HR, ADMIN_ONLY),
        RouteConfig::new("departments", "Departments", "Organization structure")
            .crud(STAFF, ADMIN_HR, ADMIN_HR, ADMIN_ONLY),
        RouteConfig::new("roles", "Roles", "Roles and permissions")
            .crud(ADMIN_ONLY, ADMIN_ONLY, ADMIN_ONLY, ADMIN_ONLY),
        RouteConfig::new("attendance", "Attendance", "Clock-in and attendance records")
            .crud(EVERYONE, EVERYONE, ADMIN_HR, ADMIN_ONLY),
        RouteConfig::new("leave", "Leave", "Leave requests and balances")
            .crud(EVERYONE, EVERYONE, STAFF, ADMIN_HR),
        RouteConfig::new("holidays", "Holidays", "Holiday calendars")
            .crud(EVERYONE, ADMIN_HR, ADMIN_HR, ADMIN_HR),
        RouteConfig::new("payroll", "Payroll", "Salary processing and payslips")
            .crud(ADMIN_HR, ADMIN_HR, ADMIN_HR, ADMIN_ONLY),
        RouteConfig::new("reports", "Reports", "HR analytics and exports")
            .crud(STAFF, NOBODY, NOBODY, NOBODY),
        RouteConfig::new("settings", "Settings", "System configuration")
            .crud(ADMIN_ONLY, NOBODY, ADMIN_ONLY, NOBODY),
        RouteConfig::new("transfers", "Transfers", "Employee transfers")
            .crud(STAFF, STAFF, ADMIN_HR, ADMIN_ONLY),
        RouteConfig::new("shifts", "Shifts", "Shift schedules")
            .crud(STAFF, &[Admin, Manager], &[Admin, Manager], ADMIN_ONLY),
        RouteConfig::new("goals", "Goals", "Goal setting and reviews")
            .crud(EVERYONE, &[Admin, Manager, Employee], &[Admin, Manager, Employee], ADMIN_ONLY),
        RouteConfig::new("recognition", "Recognition", "Peer recognition and awards")
            .crud(EVERYONE, EVERYONE, ADMIN_HR, ADMIN_ONLY),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(routes: &[&RouteConfig]) -> Vec<String> {
        routes.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_builtin_is_insertion_ordered() {
        let registry = RouteRegistry::builtin();
        assert_eq!(registry.len(), 14);
        let all: Vec<&str> = registry.get_all_routes().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(all[0], "dashboard");
        assert_eq!(all[13], "recognition");
        assert_eq!(registry.get_route_config("holidays").unwrap().path, "/holidays");
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let registry = RouteRegistry::builtin();
        assert!(registry.get_route_config("timesheets").is_none());
        assert!(!registry.can(Role::Admin, "timesheets", Action::View));
    }

    #[test]
    fn test_employee_authorized_routes() {
        let routes = RouteRegistry::builtin().get_authorized_routes(Role::Employee);
        assert_eq!(
            ids(&routes),
            vec!["dashboard", "attendance", "leave", "holidays", "goals", "recognition"]
        );
    }

    #[test]
    fn test_authorized_routes_match_view_lists_for_every_role() {
        let registry = RouteRegistry::builtin();
        for role in Role::ALL {
            let expected: Vec<String> = registry
                .get_all_routes()
                .iter()
                .filter(|r| r.permissions.view.as_ref().is_some_and(|v| v.contains(&role)))
                .map(|r| r.id.clone())
                .collect();
            assert_eq!(ids(&registry.get_authorized_routes(role)), expected);
        }
        assert_eq!(registry.get_authorized_routes(Role::Admin).len(), 14);
    }

    #[test]
    fn test_route_without_view_list_is_hidden_from_everyone() {
        let registry = RouteRegistry::new(vec![
            RouteConfig::new("dashboard", "Dashboard", "").with(Action::View, EVERYONE),
            RouteConfig::new("audit", "Audit", "").with(Action::Delete, ADMIN_ONLY),
        ]);
        for role in Role::ALL {
            assert_eq!(ids(&registry.get_authorized_routes(role)), vec!["dashboard"]);
        }
        assert!(registry.can(Role::Admin, "audit", Action::Delete));
    }

    #[test]
    fn test_actions_are_independent() {
        let registry = RouteRegistry::builtin();
        assert!(registry.can(Role::Hr, "holidays", Action::Delete));
        assert!(!registry.can(Role::Employee, "holidays", Action::Create));
        assert!(registry.can(Role::Employee, "holidays", Action::View));
        // settings has no create or delete list at all
        for role in Role::ALL {
            assert!(!registry.can(role, "settings", Action::Create));
            assert!(!registry.can(role, "settings", Action::Delete));
        }
    }

    #[test]
    fn test_empty_role_slice_clears_list() {
        let route = RouteConfig::new("x", "X", "").with(Action::Edit, NOBODY);
        assert!(route.permissions.edit.is_none());
        let json = serde_json::to_value(&route).unwrap();
        assert!(json["permissions"].get("edit").is_none());
    }
}
