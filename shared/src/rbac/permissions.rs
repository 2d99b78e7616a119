//! Permission matrix for the role editor
//!
//! Persisted roles carry flat `"<resourceId>_<action>"` strings. The editor
//! works on a per-resource matrix of action flags and converts back before
//! saving.
//!
//! ## Invariant
//! Any non-view action on a resource implies `view` on that resource.
//! - [`PermissionMatrix::toggle`] keeps the editor's historical behaviour:
//!   enabling an action forces `view`, disabling `view` leaves the rest alone.
//! - [`PermissionMatrix::set_permission`] keeps the invariant in both
//!   directions: disabling `view` also clears create/edit/delete.
//! - [`PermissionMatrix::validate`] is run before save and rejects any
//!   resource that still violates it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Action, RouteRegistry, parse_permission_key, permission_key};
use crate::error::{AppError, AppResult, ErrorCode};

/// Action flags for one resource
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionFlags {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
}

impl ActionFlags {
    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
        }
    }

    fn set(&mut self, action: Action, enabled: bool) {
        match action {
            Action::View => self.view = enabled,
            Action::Create => self.create = enabled,
            Action::Edit => self.edit = enabled,
            Action::Delete => self.delete = enabled,
        }
    }

    /// A non-view action is granted without view
    pub fn violates_view_invariant(&self) -> bool {
        !self.view && (self.create || self.edit || self.delete)
    }

    pub fn is_empty(&self) -> bool {
        !(self.view || self.create || self.edit || self.delete)
    }
}

/// Resource id -> action flags, ordered by resource id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionMatrix {
    resources: BTreeMap<String, ActionFlags>,
}

impl PermissionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// One all-false row per registry route
    pub fn for_registry(registry: &RouteRegistry) -> Self {
        let resources = registry
            .get_all_routes()
            .iter()
            .map(|r| (r.id.clone(), ActionFlags::default()))
            .collect();
        Self { resources }
    }

    /// Decode permission strings; malformed entries are skipped
    pub fn from_permissions<S: AsRef<str>>(permissions: &[S]) -> Self {
        let mut matrix = Self::new();
        for key in permissions {
            let key = key.as_ref();
            match parse_permission_key(key) {
                Some((resource, action)) => {
                    matrix
                        .resources
                        .entry(resource.to_string())
                        .or_default()
                        .set(action, true);
                }
                None => tracing::warn!(permission = %key, "Ignoring malformed permission string"),
            }
        }
        matrix
    }

    /// Encode as permission strings, ordered by resource then action
    pub fn to_permissions(&self) -> Vec<String> {
        self.resources
            .iter()
            .flat_map(|(resource, flags)| {
                Action::ALL
                    .into_iter()
                    .filter(move |a| flags.get(*a))
                    .map(move |a| permission_key(resource, a))
            })
            .collect()
    }

    /// Grant everything `other` grants; nothing is revoked
    pub fn merge(&mut self, other: &PermissionMatrix) {
        for (resource, flags) in &other.resources {
            let row = self.resources.entry(resource.clone()).or_default();
            for action in Action::ALL.into_iter().filter(|a| flags.get(*a)) {
                row.set(action, true);
            }
        }
    }

    pub fn flags(&self, resource: &str) -> ActionFlags {
        self.resources.get(resource).copied().unwrap_or_default()
    }

    pub fn is_granted(&self, resource: &str, action: Action) -> bool {
        self.flags(resource).get(action)
    }

    /// Editor checkbox behaviour: enabling any action forces `view` on;
    /// turning `view` off does not touch the other flags.
    pub fn toggle(&mut self, resource: &str, action: Action, enabled: bool) {
        let flags = self.resources.entry(resource.to_string()).or_default();
        flags.set(action, enabled);
        if enabled && action != Action::View {
            flags.view = true;
        }
    }

    /// Invariant-preserving update: enabling a non-view action grants
    /// `view`, revoking `view` revokes every other action.
    pub fn set_permission(&mut self, resource: &str, action: Action, enabled: bool) {
        let flags = self.resources.entry(resource.to_string()).or_default();
        flags.set(action, enabled);
        match (action, enabled) {
            (Action::View, false) => *flags = ActionFlags::default(),
            (_, true) => flags.view = true,
            _ => {}
        }
    }

    /// Resources holding a non-view action without `view`
    pub fn violations(&self) -> Vec<&str> {
        self.resources
            .iter()
            .filter(|(_, flags)| flags.violates_view_invariant())
            .map(|(resource, _)| resource.as_str())
            .collect()
    }

    pub fn validate(&self) -> AppResult<()> {
        let violations = self.violations();
        if violations.is_empty() {
            return Ok(());
        }
        Err(AppError::with_message(
            ErrorCode::PermissionWithoutView,
            format!(
                "View permission is required for: {}",
                violations.join(", ")
            ),
        )
        .with_detail("resources", violations))
    }
}
