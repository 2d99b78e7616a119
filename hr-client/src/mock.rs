//! In-memory backend
//!
//! Serves the same endpoints as the REST backend from process memory. Used
//! when `HR_USE_MOCK_DATA` is set and by the service tests, which inspect
//! the recorded calls and inject failures per endpoint.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{RwLock, RwLockWriteGuard};
use uuid::Uuid;

use shared::models::{
    AttendanceStatus, Goal, GoalStatus, GoalType, GoalsGroup, GoalsGroupPayload, Holiday,
    HolidayBatch, HolidayCreate, HolidayList, HolidayListCreate, HolidayListPage,
    HolidayListUpdate, HolidayStatus, HolidayUpdate, Role, RoleCreate, RoleRecord, RoleUpdate,
};
use shared::query::HolidayListQuery;
use shared::rbac::{Action, RouteRegistry, permission_key};

use crate::api::{AttendanceApi, GoalsApi, HolidaysApi, RolesApi};
use crate::{ClientError, ClientResult};

#[derive(Debug, Default)]
struct MockState {
    goals: Vec<GoalsGroup>,
    lists: Vec<HolidayList>,
    roles: Vec<RoleRecord>,
    attendance: AttendanceStatus,
    failing: HashSet<&'static str>,
    calls: Vec<&'static str>,
}

/// In-memory stand-in for the HR backend
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<RwLock<MockState>>,
    latency: Option<Duration>,
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn not_found(kind: &str, id: &str) -> ClientError {
    ClientError::NotFound(format!("{kind} {id}"))
}

impl MockBackend {
    /// Empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-filled with demo roles, holiday lists and goals
    pub fn seeded() -> Self {
        let registry = RouteRegistry::builtin();
        let roles = Role::ALL
            .into_iter()
            .map(|role| RoleRecord {
                id: role.as_str().to_lowercase(),
                name: role,
                description: format!("Built-in {} role", role.as_str().to_lowercase()),
                permissions: registry
                    .get_all_routes()
                    .iter()
                    .flat_map(|route| {
                        Action::ALL
                            .into_iter()
                            .filter(move |a| route.permissions.allows(role, *a))
                            .map(move |a| permission_key(&route.id, a))
                    })
                    .collect(),
            })
            .collect();

        let holiday = |name: &str, date: &str, recurring: bool| Holiday {
            id: new_id(),
            name: name.to_string(),
            date: date.to_string(),
            description: String::new(),
            is_recurring: recurring,
            created_at: Some(now()),
            updated_at: None,
        };
        let lists = vec![
            HolidayList {
                id: new_id(),
                name: "Company Holidays 2025".into(),
                year: 2025,
                description: "Public holidays observed in 2025".into(),
                status: HolidayStatus::Published,
                holidays: vec![
                    holiday("New Year's Day", "2025-01-01", true),
                    holiday("Labour Day", "2025-05-01", true),
                    holiday("Christmas Day", "2025-12-25", true),
                ],
                created_at: Some(now()),
                updated_at: None,
            },
            HolidayList {
                id: new_id(),
                name: "Company Holidays 2026".into(),
                year: 2026,
                description: String::new(),
                status: HolidayStatus::Draft,
                holidays: Vec::new(),
                created_at: Some(now()),
                updated_at: None,
            },
        ];

        let goals = vec![GoalsGroup {
            id: Some(new_id()),
            name: "H1 Objectives".into(),
            description: "First half targets".into(),
            goals: vec![
                Goal {
                    id: Some(new_id()),
                    name: "Ship self-service onboarding".into(),
                    accomplishment_date: "2025-06-30".into(),
                    completion_percentage: 40,
                    goal_type: GoalType::Team,
                    status: GoalStatus::Submitted,
                    ..Goal::empty()
                },
                Goal {
                    id: Some(new_id()),
                    name: "Complete leadership course".into(),
                    accomplishment_date: "2025-05-15".into(),
                    completion_percentage: 10,
                    status: GoalStatus::Submitted,
                    ..Goal::empty()
                },
            ],
            status: GoalStatus::Submitted,
            created_at: Some(now()),
            ..Default::default()
        }];

        let state = MockState {
            goals,
            lists,
            roles,
            attendance: AttendanceStatus {
                date: Utc::now().date_naive().to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        Self {
            state: Arc::new(RwLock::new(state)),
            latency: None,
        }
    }

    /// Delay every call, to exercise in-flight and cancellation paths
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Make `endpoint` (e.g. `"POST /goals/:id/reject"`) fail with a 500
    pub async fn fail(&self, endpoint: &'static str) {
        self.state.write().await.failing.insert(endpoint);
    }

    pub async fn recover(&self, endpoint: &'static str) {
        self.state.write().await.failing.remove(endpoint);
    }

    /// Endpoints called so far, in order
    pub async fn calls(&self) -> Vec<&'static str> {
        self.state.read().await.calls.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.state.read().await.calls.len()
    }

    pub async fn insert_goals(&self, group: GoalsGroup) -> GoalsGroup {
        let mut group = group;
        group.id.get_or_insert_with(new_id);
        group.goals = stamp_goals(&group.goals, group.status);
        self.state.write().await.goals.push(group.clone());
        group
    }

    pub async fn set_attendance(&self, status: AttendanceStatus) {
        self.state.write().await.attendance = status;
    }

    /// Record the call and fail it if injected
    async fn enter(&self, endpoint: &'static str) -> ClientResult<RwLockWriteGuard<'_, MockState>> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        let mut state = self.state.write().await;
        state.calls.push(endpoint);
        tracing::debug!(endpoint, "Mock backend call");
        if state.failing.contains(endpoint) {
            return Err(ClientError::Server {
                status: 500,
                body: format!("injected failure for {endpoint}"),
            });
        }
        Ok(state)
    }
}

// ========== Goals ==========

impl MockState {
    fn goals_mut(&mut self, id: &str) -> ClientResult<&mut GoalsGroup> {
        self.goals
            .iter_mut()
            .find(|g| g.id.as_deref() == Some(id))
            .ok_or_else(|| not_found("goals group", id))
    }

    fn move_goals(
        &mut self,
        id: &str,
        from: GoalStatus,
        to: GoalStatus,
    ) -> ClientResult<GoalsGroup> {
        let group = self.goals_mut(id)?;
        if group.status != from {
            return Err(ClientError::Conflict(format!(
                "goals group {id} is {}, expected {}",
                group.status.as_str(),
                from.as_str()
            )));
        }
        group.status = to;
        for goal in &mut group.goals {
            goal.status = to;
        }
        group.updated_at = Some(now());
        Ok(group.clone())
    }
}

fn stamp_goals(goals: &[Goal], status: GoalStatus) -> Vec<Goal> {
    goals
        .iter()
        .cloned()
        .map(|mut g| {
            g.id.get_or_insert_with(new_id);
            g.status = status;
            g
        })
        .collect()
}

#[async_trait]
impl GoalsApi for MockBackend {
    async fn list_goals(&self) -> ClientResult<Vec<GoalsGroup>> {
        Ok(self.enter("GET /goals").await?.goals.clone())
    }

    async fn get_goals(&self, id: &str) -> ClientResult<GoalsGroup> {
        let mut state = self.enter("GET /goals/:id").await?;
        state.goals_mut(id).map(|g| g.clone())
    }

    async fn create_goals(&self, payload: &GoalsGroupPayload) -> ClientResult<GoalsGroup> {
        let mut state = self.enter("POST /goals").await?;
        let group = GoalsGroup {
            id: Some(new_id()),
            name: payload.name.clone(),
            description: payload.description.clone(),
            goals: stamp_goals(&payload.goals, payload.status),
            status: payload.status,
            rejection_reason: None,
            created_at: Some(now()),
            updated_at: None,
        };
        state.goals.push(group.clone());
        Ok(group)
    }

    async fn update_goals(&self, id: &str, payload: &GoalsGroupPayload) -> ClientResult<GoalsGroup> {
        let mut state = self.enter("PUT /goals/:id").await?;
        let group = state.goals_mut(id)?;
        group.name = payload.name.clone();
        group.description = payload.description.clone();
        group.goals = stamp_goals(&payload.goals, payload.status);
        group.status = payload.status;
        group.updated_at = Some(now());
        Ok(group.clone())
    }

    async fn delete_goals(&self, id: &str) -> ClientResult<()> {
        let mut state = self.enter("DELETE /goals/:id").await?;
        let before = state.goals.len();
        state.goals.retain(|g| g.id.as_deref() != Some(id));
        if state.goals.len() == before {
            return Err(not_found("goals group", id));
        }
        Ok(())
    }

    async fn patch_goals_status(&self, id: &str, status: GoalStatus) -> ClientResult<GoalsGroup> {
        let mut state = self.enter("PATCH /goals/:id/status").await?;
        let group = state.goals_mut(id)?;
        group.status = status;
        for goal in &mut group.goals {
            goal.status = status;
        }
        if status == GoalStatus::Draft {
            group.rejection_reason = None;
        }
        group.updated_at = Some(now());
        Ok(group.clone())
    }

    async fn submit_goals(&self, id: &str) -> ClientResult<GoalsGroup> {
        self.enter("POST /goals/:id/submit")
            .await?
            .move_goals(id, GoalStatus::Draft, GoalStatus::Submitted)
    }

    async fn approve_goals(&self, id: &str) -> ClientResult<GoalsGroup> {
        self.enter("POST /goals/:id/approve")
            .await?
            .move_goals(id, GoalStatus::Submitted, GoalStatus::Approved)
    }

    async fn reject_goals(&self, id: &str, comments: &str) -> ClientResult<GoalsGroup> {
        let mut state = self.enter("POST /goals/:id/reject").await?;
        if comments.trim().is_empty() {
            return Err(ClientError::Validation("comments are required".into()));
        }
        state.move_goals(id, GoalStatus::Submitted, GoalStatus::Rejected)?;
        let group = state.goals_mut(id)?;
        group.rejection_reason = Some(comments.to_string());
        Ok(group.clone())
    }

    async fn complete_goals_review(&self, id: &str) -> ClientResult<GoalsGroup> {
        self.enter("POST /goals/:id/complete")
            .await?
            .move_goals(id, GoalStatus::ReviewPending, GoalStatus::Completed)
    }
}

// ========== Holidays ==========

impl MockState {
    fn list_mut(&mut self, id: &str) -> ClientResult<&mut HolidayList> {
        self.lists
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| not_found("holiday list", id))
    }

    /// Mutable list that is not archived
    fn open_list_mut(&mut self, id: &str) -> ClientResult<&mut HolidayList> {
        let list = self.list_mut(id)?;
        if list.status == HolidayStatus::Archived {
            return Err(ClientError::Conflict(format!("holiday list {id} is archived")));
        }
        Ok(list)
    }
}

fn make_holiday(payload: &HolidayCreate) -> Holiday {
    Holiday {
        id: new_id(),
        name: payload.name.trim().to_string(),
        date: payload.date.clone(),
        description: payload.description.clone(),
        is_recurring: payload.is_recurring,
        created_at: Some(now()),
        updated_at: None,
    }
}

#[async_trait]
impl HolidaysApi for MockBackend {
    async fn list_holiday_lists(&self, query: &HolidayListQuery) -> ClientResult<HolidayListPage> {
        let state = self.enter("GET /holiday-lists").await?;
        let lists: Vec<HolidayList> = state
            .lists
            .iter()
            .filter(|l| query.year.is_none_or(|y| y == l.year))
            .filter(|l| query.status.is_none_or(|s| s == l.status))
            .cloned()
            .collect();
        Ok(HolidayListPage {
            total: lists.len() as u64,
            lists,
        })
    }

    async fn get_holiday_list(&self, id: &str) -> ClientResult<HolidayList> {
        let mut state = self.enter("GET /holiday-lists/:id").await?;
        state.list_mut(id).map(|l| l.clone())
    }

    async fn create_holiday_list(&self, payload: &HolidayListCreate) -> ClientResult<HolidayList> {
        let mut state = self.enter("POST /holiday-lists").await?;
        let list = HolidayList {
            id: new_id(),
            name: payload.name.clone(),
            year: payload.year,
            description: payload.description.clone(),
            status: payload.status,
            holidays: Vec::new(),
            created_at: Some(now()),
            updated_at: None,
        };
        state.lists.push(list.clone());
        Ok(list)
    }

    async fn update_holiday_list(
        &self,
        id: &str,
        payload: &HolidayListUpdate,
    ) -> ClientResult<HolidayList> {
        let mut state = self.enter("PUT /holiday-lists/:id").await?;
        let list = state.open_list_mut(id)?;
        if let Some(name) = &payload.name {
            list.name = name.clone();
        }
        if let Some(year) = payload.year {
            list.year = year;
        }
        if let Some(description) = &payload.description {
            list.description = description.clone();
        }
        list.updated_at = Some(now());
        Ok(list.clone())
    }

    async fn publish_holiday_list(&self, id: &str) -> ClientResult<HolidayList> {
        let mut state = self.enter("PUT /holiday-lists/:id/publish").await?;
        let list = state.list_mut(id)?;
        if list.status != HolidayStatus::Draft || list.holidays.is_empty() {
            return Err(ClientError::Conflict(format!(
                "holiday list {id} cannot be published"
            )));
        }
        list.status = HolidayStatus::Published;
        list.updated_at = Some(now());
        Ok(list.clone())
    }

    async fn archive_holiday_list(&self, id: &str) -> ClientResult<HolidayList> {
        let mut state = self.enter("PUT /holiday-lists/:id/archive").await?;
        let list = state.list_mut(id)?;
        if list.status != HolidayStatus::Published {
            return Err(ClientError::Conflict(format!(
                "holiday list {id} cannot be archived"
            )));
        }
        list.status = HolidayStatus::Archived;
        list.updated_at = Some(now());
        Ok(list.clone())
    }

    async fn delete_holiday_list(&self, id: &str) -> ClientResult<()> {
        let mut state = self.enter("DELETE /holiday-lists/:id").await?;
        state.open_list_mut(id)?;
        state.lists.retain(|l| l.id != id);
        Ok(())
    }

    async fn list_holidays(&self, list_id: &str) -> ClientResult<Vec<Holiday>> {
        let mut state = self.enter("GET /holiday-lists/:id/holidays").await?;
        state.list_mut(list_id).map(|l| l.holidays.clone())
    }

    async fn create_holiday(&self, list_id: &str, payload: &HolidayCreate) -> ClientResult<Holiday> {
        let mut state = self.enter("POST /holiday-lists/:id/holidays").await?;
        let list = state.open_list_mut(list_id)?;
        if list.holidays.iter().any(|h| h.matches(payload)) {
            return Err(ClientError::Conflict(format!(
                "{} on {} already exists",
                payload.name, payload.date
            )));
        }
        let holiday = make_holiday(payload);
        list.holidays.push(holiday.clone());
        list.updated_at = Some(now());
        Ok(holiday)
    }

    async fn update_holiday(
        &self,
        list_id: &str,
        holiday_id: &str,
        payload: &HolidayUpdate,
    ) -> ClientResult<Holiday> {
        let mut state = self.enter("PUT /holiday-lists/:id/holidays/:holidayId").await?;
        let list = state.open_list_mut(list_id)?;
        let holiday = list
            .holidays
            .iter_mut()
            .find(|h| h.id == holiday_id)
            .ok_or_else(|| not_found("holiday", holiday_id))?;
        if let Some(name) = &payload.name {
            holiday.name = name.clone();
        }
        if let Some(date) = &payload.date {
            holiday.date = date.clone();
        }
        if let Some(description) = &payload.description {
            holiday.description = description.clone();
        }
        if let Some(is_recurring) = payload.is_recurring {
            holiday.is_recurring = is_recurring;
        }
        holiday.updated_at = Some(now());
        Ok(holiday.clone())
    }

    async fn delete_holiday(&self, list_id: &str, holiday_id: &str) -> ClientResult<()> {
        let mut state = self.enter("DELETE /holiday-lists/:id/holidays/:holidayId").await?;
        let list = state.open_list_mut(list_id)?;
        let before = list.holidays.len();
        list.holidays.retain(|h| h.id != holiday_id);
        if list.holidays.len() == before {
            return Err(not_found("holiday", holiday_id));
        }
        Ok(())
    }

    async fn create_holidays_batch(
        &self,
        list_id: &str,
        batch: &HolidayBatch,
    ) -> ClientResult<Vec<Holiday>> {
        let mut state = self.enter("POST /holiday-lists/:id/holidays/batch").await?;
        let list = state.open_list_mut(list_id)?;
        if let Some(dup) = batch
            .holidays
            .iter()
            .find(|p| list.holidays.iter().any(|h| h.matches(p)))
        {
            return Err(ClientError::Conflict(format!(
                "{} on {} already exists",
                dup.name, dup.date
            )));
        }
        let created: Vec<Holiday> = batch.holidays.iter().map(make_holiday).collect();
        list.holidays.extend(created.iter().cloned());
        list.updated_at = Some(now());
        Ok(created)
    }
}

// ========== Roles ==========

#[async_trait]
impl RolesApi for MockBackend {
    async fn list_roles(&self) -> ClientResult<Vec<RoleRecord>> {
        Ok(self.enter("GET /roles").await?.roles.clone())
    }

    async fn get_role(&self, id: &str) -> ClientResult<RoleRecord> {
        self.enter("GET /roles/:id")
            .await?
            .roles
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| not_found("role", id))
    }

    async fn create_role(&self, payload: &RoleCreate) -> ClientResult<RoleRecord> {
        let mut state = self.enter("POST /roles").await?;
        if state.roles.iter().any(|r| r.name == payload.name) {
            return Err(ClientError::Conflict(format!("role {} exists", payload.name)));
        }
        let role = RoleRecord {
            id: new_id(),
            name: payload.name,
            description: payload.description.clone(),
            permissions: payload.permissions.clone(),
        };
        state.roles.push(role.clone());
        Ok(role)
    }

    async fn update_role(&self, id: &str, payload: &RoleUpdate) -> ClientResult<RoleRecord> {
        let mut state = self.enter("PUT /roles/:id").await?;
        if let Some(name) = payload.name
            && state.roles.iter().any(|r| r.name == name && r.id != id)
        {
            return Err(ClientError::Conflict(format!("role {name} exists")));
        }
        let role = state
            .roles
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found("role", id))?;
        if let Some(name) = payload.name {
            role.name = name;
        }
        if let Some(description) = &payload.description {
            role.description = description.clone();
        }
        if let Some(permissions) = &payload.permissions {
            role.permissions = permissions.clone();
        }
        Ok(role.clone())
    }

    async fn delete_role(&self, id: &str) -> ClientResult<()> {
        let mut state = self.enter("DELETE /roles/:id").await?;
        let before = state.roles.len();
        state.roles.retain(|r| r.id != id);
        if state.roles.len() == before {
            return Err(not_found("role", id));
        }
        Ok(())
    }
}

// ========== Attendance ==========

#[async_trait]
impl AttendanceApi for MockBackend {
    async fn attendance_status(&self) -> ClientResult<AttendanceStatus> {
        Ok(self.enter("GET /attendance/status").await?.attendance.clone())
    }

    async fn clock_in(&self) -> ClientResult<AttendanceStatus> {
        let mut state = self.enter("POST /attendance/clock-in").await?;
        if state.attendance.clock_in_time.is_some() {
            return Err(ClientError::Conflict("already clocked in today".into()));
        }
        let now = Utc::now();
        state.attendance = AttendanceStatus {
            clocked_in: true,
            clock_in_time: Some(now.to_rfc3339()),
            clock_out_time: None,
            date: now.date_naive().to_string(),
        };
        Ok(state.attendance.clone())
    }

    async fn clock_out(&self) -> ClientResult<AttendanceStatus> {
        let mut state = self.enter("POST /attendance/clock-out").await?;
        if !state.attendance.can_clock_out() {
            return Err(ClientError::Conflict("no open clock-in".into()));
        }
        state.attendance.clocked_in = false;
        state.attendance.clock_out_time = Some(now());
        Ok(state.attendance.clone())
    }
}
