//! Holiday list management
//!
//! Lifecycle guards run client-side: a request for a disallowed action is
//! never sent. Adding several holidays tries the all-or-nothing batch
//! endpoint first and falls back to idempotent per-item creation, reporting
//! exactly what happened through [`BatchReport`].

use std::sync::Arc;

use serde::Serialize;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{
    Holiday, HolidayBatch, HolidayCreate, HolidayList, HolidayListCreate, HolidayListUpdate,
    HolidayUpdate, Role,
};
use shared::query::{HolidayListQuery, Page};
use shared::rbac::Action;
use shared::workflow::HolidayAction;

use super::authorize;
use crate::api::{HolidaysApi, HrBackend};
use crate::error::{Operation, OperationExt};

const RESOURCE: &str = "holidays";

/// Attempts per item in the fallback path
const ITEM_ATTEMPTS: usize = 2;

/// One holiday the fallback path could not create
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub holiday: HolidayCreate,
    pub message: String,
}

/// Outcome of [`HolidayService::add_holidays`]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub created: Vec<Holiday>,
    /// Already on the list (same name and date)
    pub skipped: Vec<HolidayCreate>,
    pub failed: Vec<BatchFailure>,
    /// The batch endpoint succeeded; no fallback was needed
    pub used_batch: bool,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Err when any item failed, carrying the counts
    pub fn into_result(self) -> AppResult<Self> {
        if self.is_complete() {
            return Ok(self);
        }
        Err(AppError::with_message(
            ErrorCode::HolidayBatchIncomplete,
            format!(
                "{} of {} holidays could not be added. Please try again.",
                self.failed.len(),
                self.created.len() + self.skipped.len() + self.failed.len()
            ),
        )
        .with_detail("created", self.created.len())
        .with_detail("skipped", self.skipped.len())
        .with_detail("failed", self.failed.len()))
    }
}

/// Holiday lists and their holidays
#[derive(Clone)]
pub struct HolidayService {
    backend: Arc<dyn HrBackend>,
    role: Role,
}

impl HolidayService {
    pub fn new(backend: Arc<dyn HrBackend>, role: Role) -> Self {
        Self { backend, role }
    }

    /// Server-side year/status filter, then local search, sort and paging
    pub async fn list(&self, query: &HolidayListQuery) -> AppResult<Page<HolidayList>> {
        let page = self
            .backend
            .list_holiday_lists(query)
            .await
            .for_op(Operation::LoadHolidayLists)?;
        tracing::debug!(total = page.total, "Holiday lists loaded");
        Ok(query.apply(&page.lists))
    }

    pub async fn get(&self, id: &str) -> AppResult<HolidayList> {
        self.backend
            .get_holiday_list(id)
            .await
            .for_op(Operation::LoadHolidayLists)
    }

    pub async fn holidays(&self, list: &HolidayList) -> AppResult<Vec<Holiday>> {
        self.backend
            .list_holidays(&list.id)
            .await
            .for_op(Operation::LoadHolidays)
    }

    pub async fn create(&self, payload: &HolidayListCreate) -> AppResult<HolidayList> {
        authorize(self.role, RESOURCE, Action::Create)?;
        payload.validate()?;
        let list = self
            .backend
            .create_holiday_list(payload)
            .await
            .for_op(Operation::SaveHolidayList)?;
        tracing::info!(id = %list.id, year = list.year, "Holiday list created");
        Ok(list)
    }

    pub async fn update(
        &self,
        list: &HolidayList,
        payload: &HolidayListUpdate,
    ) -> AppResult<HolidayList> {
        list.check(HolidayAction::Edit)?;
        authorize(self.role, RESOURCE, Action::Edit)?;
        payload.validate()?;
        self.backend
            .update_holiday_list(&list.id, payload)
            .await
            .for_op(Operation::SaveHolidayList)
    }

    pub async fn publish(&self, list: &HolidayList) -> AppResult<HolidayList> {
        self.transition(list, HolidayAction::Publish, Operation::PublishHolidayList)
            .await
    }

    pub async fn archive(&self, list: &HolidayList) -> AppResult<HolidayList> {
        self.transition(list, HolidayAction::Archive, Operation::ArchiveHolidayList)
            .await
    }

    pub async fn delete(&self, list: &HolidayList) -> AppResult<()> {
        list.check(HolidayAction::Delete)?;
        authorize(self.role, RESOURCE, Action::Delete)?;
        self.backend
            .delete_holiday_list(&list.id)
            .await
            .for_op(Operation::DeleteHolidayList)?;
        tracing::info!(id = %list.id, "Holiday list deleted");
        Ok(())
    }

    pub async fn add_holiday(&self, list: &HolidayList, payload: &HolidayCreate) -> AppResult<Holiday> {
        list.check(HolidayAction::AddHoliday)?;
        authorize(self.role, RESOURCE, Action::Create)?;
        payload.validate()?;
        self.backend
            .create_holiday(&list.id, payload)
            .await
            .for_op(Operation::SaveHoliday)
    }

    pub async fn update_holiday(
        &self,
        list: &HolidayList,
        holiday_id: &str,
        payload: &HolidayUpdate,
    ) -> AppResult<Holiday> {
        list.check(HolidayAction::Edit)?;
        authorize(self.role, RESOURCE, Action::Edit)?;
        payload.validate()?;
        self.backend
            .update_holiday(&list.id, holiday_id, payload)
            .await
            .for_op(Operation::SaveHoliday)
    }

    pub async fn delete_holiday(&self, list: &HolidayList, holiday_id: &str) -> AppResult<()> {
        list.check(HolidayAction::Edit)?;
        authorize(self.role, RESOURCE, Action::Delete)?;
        self.backend
            .delete_holiday(&list.id, holiday_id)
            .await
            .for_op(Operation::DeleteHoliday)
    }

    /// Add several holidays at once.
    ///
    /// Every item is validated before any request. The batch endpoint is
    /// tried first; if it fails, items are created one by one, skipping any
    /// already on the list and retrying each failure once.
    pub async fn add_holidays(
        &self,
        list: &HolidayList,
        holidays: Vec<HolidayCreate>,
    ) -> AppResult<BatchReport> {
        list.check(HolidayAction::AddHoliday)?;
        authorize(self.role, RESOURCE, Action::Create)?;
        for holiday in &holidays {
            holiday.validate()?;
        }
        if holidays.is_empty() {
            return Ok(BatchReport::default());
        }

        let batch = HolidayBatch { holidays };
        match self.backend.create_holidays_batch(&list.id, &batch).await {
            Ok(created) => {
                tracing::info!(list = %list.id, count = created.len(), "Holiday batch created");
                return Ok(BatchReport {
                    created,
                    used_batch: true,
                    ..Default::default()
                });
            }
            Err(e) => {
                tracing::warn!(list = %list.id, error = %e, "Holiday batch failed, creating one by one");
            }
        }

        let mut known = match self.backend.list_holidays(&list.id).await {
            Ok(holidays) => holidays,
            Err(e) => {
                tracing::warn!(list = %list.id, error = %e, "Could not refresh holidays, using cached copy");
                list.holidays.clone()
            }
        };

        let mut report = BatchReport::default();
        for item in batch.holidays {
            if known.iter().any(|h| h.matches(&item)) {
                tracing::debug!(name = %item.name, date = %item.date, "Holiday already present, skipped");
                report.skipped.push(item);
                continue;
            }
            match self.create_with_retry(&list.id, &item).await {
                Ok(holiday) => {
                    known.push(holiday.clone());
                    report.created.push(holiday);
                }
                Err(e) => {
                    let message = e.into_app_error(Operation::SaveHoliday).message;
                    report.failed.push(BatchFailure {
                        holiday: item,
                        message,
                    });
                }
            }
        }
        tracing::info!(
            list = %list.id,
            created = report.created.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Holiday fallback finished"
        );
        Ok(report)
    }

    async fn create_with_retry(
        &self,
        list_id: &str,
        item: &HolidayCreate,
    ) -> crate::ClientResult<Holiday> {
        let mut attempt = 1;
        loop {
            match self.backend.create_holiday(list_id, item).await {
                Ok(holiday) => return Ok(holiday),
                Err(e) if attempt < ITEM_ATTEMPTS => {
                    tracing::warn!(name = %item.name, attempt, error = %e, "Retrying holiday");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn transition(
        &self,
        list: &HolidayList,
        action: HolidayAction,
        op: Operation,
    ) -> AppResult<HolidayList> {
        list.check(action)?;
        authorize(self.role, RESOURCE, Action::Edit)?;
        let updated = match action {
            HolidayAction::Archive => self.backend.archive_holiday_list(&list.id).await,
            _ => self.backend.publish_holiday_list(&list.id).await,
        }
        .for_op(op)?;
        tracing::info!(
            id = %list.id,
            from = list.status.as_str(),
            to = updated.status.as_str(),
            "Holiday list transition"
        );
        Ok(updated)
    }
}
