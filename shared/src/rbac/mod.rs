//! Role-based access control
//!
//! - [`registry`]: static route table with per-action role lists
//! - [`menu`]: navigation grouping of the routes a role may view
//! - [`permissions`]: role-edit permission matrix and its string encoding

pub mod menu;
pub mod permissions;
pub mod registry;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use menu::{MenuGroup, MenuGroupKind, build_menu};
pub use permissions::{ActionFlags, PermissionMatrix};
pub use registry::{RouteConfig, RoutePermissions, RouteRegistry};

/// CRUD action on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "view" => Ok(Self::View),
            "create" => Ok(Self::Create),
            "edit" => Ok(Self::Edit),
            "delete" => Ok(Self::Delete),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

/// Build a `"<resourceId>_<action>"` permission string
pub fn permission_key(resource: &str, action: Action) -> String {
    format!("{resource}_{action}")
}

/// Split a permission string into resource id and action
pub fn parse_permission_key(key: &str) -> Option<(&str, Action)> {
    let (resource, action) = key.rsplit_once('_')?;
    if resource.is_empty() {
        return None;
    }
    action.parse().ok().map(|a| (resource, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_key_roundtrip() {
        assert_eq!(permission_key("goals", Action::Edit), "goals_edit");
        assert_eq!(parse_permission_key("goals_edit"), Some(("goals", Action::Edit)));
        assert_eq!(
            parse_permission_key("holiday_lists_view"),
            Some(("holiday_lists", Action::View))
        );
    }

    #[test]
    fn test_parse_permission_key_rejects_malformed() {
        assert_eq!(parse_permission_key("goals"), None);
        assert_eq!(parse_permission_key("_view"), None);
        assert_eq!(parse_permission_key("goals_approve"), None);
        assert_eq!(parse_permission_key("goals_View"), None);
    }
}
