//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dashboard role (RBAC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    Employee,
    Hr,
}

impl Role {
    /// Every role, in declaration order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Manager, Role::Employee, Role::Hr];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Employee => "EMPLOYEE",
            Self::Hr => "HR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "EMPLOYEE" => Ok(Self::Employee),
            "HR" => Ok(Self::Hr),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

/// Role entity as persisted by the backend
///
/// `permissions` holds `"<resourceId>_<action>"` strings, e.g. `"goals_edit"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRecord {
    pub id: String,
    pub name: Role,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Create role payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCreate {
    pub name: Role,
    pub description: String,
    pub permissions: Vec<String>,
}

/// Update role payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!(" Hr ".parse::<Role>(), Ok(Role::Hr));
        assert_eq!(
            "intern".parse::<Role>(),
            Err(UnknownRole("intern".to_string()))
        );
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"EMPLOYEE\"");
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"HR\"");
        let role: Role = serde_json::from_str("\"MANAGER\"").unwrap();
        assert_eq!(role, Role::Manager);
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_role_record_deserialize() {
        let json = r#"{"id":"r1","name":"HR","permissions":["holidays_view","holidays_edit"]}"#;
        let record: RoleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, Role::Hr);
        assert_eq!(record.description, "");
        assert_eq!(record.permissions.len(), 2);
    }

    #[test]
    fn test_role_update_skips_absent_fields() {
        let update = RoleUpdate {
            description: Some("Payroll".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"description":"Payroll"}"#);
    }
}
