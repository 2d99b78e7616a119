//! Role administration
//!
//! Permissions are edited as a [`PermissionMatrix`] and stored as flat
//! strings. The matrix is validated before create or update is sent.

use std::sync::Arc;

use shared::error::AppResult;
use shared::models::{Role, RoleCreate, RoleRecord, RoleUpdate};
use shared::query::{Page, RolesQuery};
use shared::rbac::{Action, PermissionMatrix, RouteRegistry};
use shared::validation::{MAX_NOTE_LEN, validate_optional_text};

use super::authorize;
use crate::api::{HrBackend, RolesApi};
use crate::error::{Operation, OperationExt};

const RESOURCE: &str = "roles";

#[derive(Clone)]
pub struct RoleService {
    backend: Arc<dyn HrBackend>,
    role: Role,
}

impl RoleService {
    pub fn new(backend: Arc<dyn HrBackend>, role: Role) -> Self {
        Self { backend, role }
    }

    pub async fn list(&self, query: &RolesQuery) -> AppResult<Page<RoleRecord>> {
        authorize(self.role, RESOURCE, Action::View)?;
        let roles = self.backend.list_roles().await.for_op(Operation::LoadRoles)?;
        Ok(query.apply(&roles))
    }

    pub async fn get(&self, id: &str) -> AppResult<RoleRecord> {
        authorize(self.role, RESOURCE, Action::View)?;
        self.backend.get_role(id).await.for_op(Operation::LoadRoles)
    }

    /// Editor model for `record`: one row per registry route plus any
    /// resource the record mentions that the registry does not know
    pub fn matrix_for(record: &RoleRecord) -> PermissionMatrix {
        let mut matrix = PermissionMatrix::for_registry(RouteRegistry::builtin());
        matrix.merge(&PermissionMatrix::from_permissions(&record.permissions));
        matrix
    }

    pub async fn create(
        &self,
        name: Role,
        description: &str,
        matrix: &PermissionMatrix,
    ) -> AppResult<RoleRecord> {
        authorize(self.role, RESOURCE, Action::Create)?;
        validate_optional_text(description, "Description", MAX_NOTE_LEN)?;
        matrix.validate()?;

        let payload = RoleCreate {
            name,
            description: description.trim().to_string(),
            permissions: matrix.to_permissions(),
        };
        let created = self
            .backend
            .create_role(&payload)
            .await
            .for_op(Operation::SaveRole)?;
        tracing::info!(id = %created.id, name = %created.name, "Role created");
        Ok(created)
    }

    /// Update description and/or permissions; `None` leaves a field as is
    pub async fn update(
        &self,
        id: &str,
        description: Option<&str>,
        matrix: Option<&PermissionMatrix>,
    ) -> AppResult<RoleRecord> {
        authorize(self.role, RESOURCE, Action::Edit)?;
        if let Some(description) = description {
            validate_optional_text(description, "Description", MAX_NOTE_LEN)?;
        }
        if let Some(matrix) = matrix {
            matrix.validate()?;
        }

        let payload = RoleUpdate {
            name: None,
            description: description.map(|d| d.trim().to_string()),
            permissions: matrix.map(PermissionMatrix::to_permissions),
        };
        let updated = self
            .backend
            .update_role(id, &payload)
            .await
            .for_op(Operation::SaveRole)?;
        tracing::info!(id, "Role updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        authorize(self.role, RESOURCE, Action::Delete)?;
        self.backend
            .delete_role(id)
            .await
            .for_op(Operation::DeleteRole)?;
        tracing::info!(id, "Role deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockBackend;
    use shared::error::ErrorCode;

    fn admin(backend: &MockBackend) -> RoleService {
        RoleService::new(Arc::new(backend.clone()), Role::Admin)
    }

    #[tokio::test]
    async fn test_invalid_matrix_is_not_sent() {
        let backend = MockBackend::new();
        let mut matrix = PermissionMatrix::new();
        matrix.toggle("payroll", Action::Edit, true);
        matrix.toggle("payroll", Action::View, false);

        let err = admin(&backend)
            .create(Role::Hr, "People team", &matrix)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionWithoutView);
        assert_eq!(backend.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_and_update() {
        let backend = MockBackend::new();
        let service = admin(&backend);
        let mut matrix = PermissionMatrix::new();
        matrix.set_permission("goals", Action::Edit, true);

        let created = service.create(Role::Manager, " Leads ", &matrix).await.unwrap();
        assert_eq!(created.description, "Leads");
        assert_eq!(created.permissions, vec!["goals_view", "goals_edit"]);

        matrix.set_permission("goals", Action::View, false);
        let updated = service
            .update(&created.id, None, Some(&matrix))
            .await
            .unwrap();
        assert!(updated.permissions.is_empty());
        assert_eq!(updated.description, "Leads");
    }

    #[tokio::test]
    async fn test_only_admin_manages_roles() {
        let backend = MockBackend::seeded();
        let hr = RoleService::new(Arc::new(backend.clone()), Role::Hr);
        assert_eq!(
            hr.list(&RolesQuery::new()).await.unwrap_err().code,
            ErrorCode::PermissionDenied
        );
        assert_eq!(
            hr.delete("admin").await.unwrap_err().code,
            ErrorCode::PermissionDenied
        );
        assert_eq!(backend.call_count().await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_name_surfaces_save_message() {
        let backend = MockBackend::seeded();
        let err = admin(&backend)
            .create(Role::Admin, "", &PermissionMatrix::new())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Failed to save role. Please try again.");
        assert_eq!(err.code, ErrorCode::RoleNameExists);
    }

    #[test]
    fn test_matrix_for_record() {
        let record = RoleRecord {
            id: "r1".into(),
            name: Role::Employee,
            description: String::new(),
            permissions: vec!["goals_view".into(), "wiki_view".into()],
        };
        let matrix = RoleService::matrix_for(&record);
        assert!(matrix.is_granted("goals", Action::View));
        assert!(matrix.is_granted("wiki", Action::View));
        assert!(!matrix.is_granted("payroll", Action::View));
        assert_eq!(matrix.to_permissions(), vec!["goals_view", "wiki_view"]);
    }
}
