//! Goals endpoints

use async_trait::async_trait;
use shared::models::{GoalStatus, GoalsGroup, GoalsGroupPayload, RejectRequest, StatusPatch};

use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait GoalsApi: Send + Sync {
    /// `GET /goals`
    async fn list_goals(&self) -> ClientResult<Vec<GoalsGroup>>;
    /// `GET /goals/:id`
    async fn get_goals(&self, id: &str) -> ClientResult<GoalsGroup>;
    /// `POST /goals`
    async fn create_goals(&self, payload: &GoalsGroupPayload) -> ClientResult<GoalsGroup>;
    /// `PUT /goals/:id`
    async fn update_goals(&self, id: &str, payload: &GoalsGroupPayload) -> ClientResult<GoalsGroup>;
    /// `DELETE /goals/:id`
    async fn delete_goals(&self, id: &str) -> ClientResult<()>;
    /// `PATCH /goals/:id/status`
    async fn patch_goals_status(&self, id: &str, status: GoalStatus) -> ClientResult<GoalsGroup>;
    /// `POST /goals/:id/submit`
    async fn submit_goals(&self, id: &str) -> ClientResult<GoalsGroup>;
    /// `POST /goals/:id/approve`
    async fn approve_goals(&self, id: &str) -> ClientResult<GoalsGroup>;
    /// `POST /goals/:id/reject`
    async fn reject_goals(&self, id: &str, comments: &str) -> ClientResult<GoalsGroup>;
    /// `POST /goals/:id/complete`
    async fn complete_goals_review(&self, id: &str) -> ClientResult<GoalsGroup>;
}

#[async_trait]
impl GoalsApi for HttpClient {
    async fn list_goals(&self) -> ClientResult<Vec<GoalsGroup>> {
        self.get("goals").await
    }

    async fn get_goals(&self, id: &str) -> ClientResult<GoalsGroup> {
        self.get(&format!("goals/{id}")).await
    }

    async fn create_goals(&self, payload: &GoalsGroupPayload) -> ClientResult<GoalsGroup> {
        self.post("goals", payload).await
    }

    async fn update_goals(&self, id: &str, payload: &GoalsGroupPayload) -> ClientResult<GoalsGroup> {
        self.put(&format!("goals/{id}"), payload).await
    }

    async fn delete_goals(&self, id: &str) -> ClientResult<()> {
        self.delete(&format!("goals/{id}")).await
    }

    async fn patch_goals_status(&self, id: &str, status: GoalStatus) -> ClientResult<GoalsGroup> {
        self.patch(&format!("goals/{id}/status"), &StatusPatch { status })
            .await
    }

    async fn submit_goals(&self, id: &str) -> ClientResult<GoalsGroup> {
        self.post_empty(&format!("goals/{id}/submit")).await
    }

    async fn approve_goals(&self, id: &str) -> ClientResult<GoalsGroup> {
        self.post_empty(&format!("goals/{id}/approve")).await
    }

    async fn reject_goals(&self, id: &str, comments: &str) -> ClientResult<GoalsGroup> {
        let body = RejectRequest {
            comments: comments.to_string(),
        };
        self.post(&format!("goals/{id}/reject"), &body).await
    }

    async fn complete_goals_review(&self, id: &str) -> ClientResult<GoalsGroup> {
        self.post_empty(&format!("goals/{id}/complete")).await
    }
}
