//! Navigation menu grouping

use serde::Serialize;

use super::registry::{RouteConfig, RouteRegistry};
use crate::models::Role;

/// Fixed navigation sections, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MenuGroupKind {
    Main,
    Management,
    Operations,
    FinanceReports,
    System,
}

impl MenuGroupKind {
    pub const ALL: [MenuGroupKind; 5] = [
        MenuGroupKind::Main,
        MenuGroupKind::Management,
        MenuGroupKind::Operations,
        MenuGroupKind::FinanceReports,
        MenuGroupKind::System,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Management => "Management",
            Self::Operations => "Operations",
            Self::FinanceReports => "Finance & Reports",
            Self::System => "System",
        }
    }

    /// Route ids belonging to this section
    pub fn route_ids(&self) -> &'static [&'static str] {
        match self {
            Self::Main => &["dashboard"],
            Self::Management => &["employees", "departments", "roles", "transfers"],
            Self::Operations => &["attendance", "leave", "holidays", "shifts", "goals", "recognition"],
            Self::FinanceReports => &["payroll", "reports"],
            Self::System => &["settings"],
        }
    }
}

/// One visible navigation section
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuGroup<'a> {
    pub kind: MenuGroupKind,
    pub label: &'static str,
    pub routes: Vec<&'a RouteConfig>,
}

/// Sections visible to `role`; a section with no authorized route is omitted
pub fn build_menu(role: Role, registry: &RouteRegistry) -> Vec<MenuGroup<'_>> {
    let authorized = registry.get_authorized_routes(role);
    MenuGroupKind::ALL
        .iter()
        .filter_map(|kind| {
            let routes: Vec<&RouteConfig> = kind
                .route_ids()
                .iter()
                .filter_map(|id| authorized.iter().copied().find(|r| r.id == *id))
                .collect();
            (!routes.is_empty()).then(|| MenuGroup {
                kind: *kind,
                label: kind.label(),
                routes,
            })
        })
        .collect()
}
