use async_trait::async_trait;
use shared::models::{RoleCreate, RoleRecord, RoleUpdate};

use crate::{ClientResult, HttpClient};

/// `/roles` CRUD
#[async_trait]
pub trait RolesApi: Send + Sync {
    async fn list_roles(&self) -> ClientResult<Vec<RoleRecord>>;
    async fn get_role(&self, id: &str) -> ClientResult<RoleRecord>;
    async fn create_role(&self, payload: &RoleCreate) -> ClientResult<RoleRecord>;
    async fn update_role(&self, id: &str, payload: &RoleUpdate) -> ClientResult<RoleRecord>;
    async fn delete_role(&self, id: &str) -> ClientResult<()>;
}

#[async_trait]
impl RolesApi for HttpClient {
    async fn list_roles(&self) -> ClientResult<Vec<RoleRecord>> {
        self.get("roles").await
    }

    async fn get_role(&self, id: &str) -> ClientResult<RoleRecord> {
        self.get(&format!("roles/{id}")).await
    }

    async fn create_role(&self, payload: &RoleCreate) -> ClientResult<RoleRecord> {
        self.post("roles", payload).await
    }

    async fn update_role(&self, id: &str, payload: &RoleUpdate) -> ClientResult<RoleRecord> {
        self.put(&format!("roles/{id}"), payload).await
    }

    async fn delete_role(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("roles/{id}")).await
    }
}
