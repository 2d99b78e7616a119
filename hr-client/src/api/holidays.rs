//! Holiday list endpoints
//!
//! Every request here is bounded by the holiday timeout.

use async_trait::async_trait;
use reqwest::Method;
use shared::models::{
    Holiday, HolidayBatch, HolidayCreate, HolidayList, HolidayListCreate, HolidayListPage,
    HolidayListUpdate, HolidayUpdate,
};
use shared::query::HolidayListQuery;

use crate::{ClientResult, HttpClient};

#[async_trait]
pub trait HolidaysApi: Send + Sync {
    /// `GET /holiday-lists?year&status`
    async fn list_holiday_lists(&self, query: &HolidayListQuery) -> ClientResult<HolidayListPage>;
    async fn get_holiday_list(&self, id: &str) -> ClientResult<HolidayList>;
    async fn create_holiday_list(&self, payload: &HolidayListCreate) -> ClientResult<HolidayList>;
    async fn update_holiday_list(
        &self,
        id: &str,
        payload: &HolidayListUpdate,
    ) -> ClientResult<HolidayList>;
    /// `PUT /holiday-lists/:id/publish`
    async fn publish_holiday_list(&self, id: &str) -> ClientResult<HolidayList>;
    /// `PUT /holiday-lists/:id/archive`
    async fn archive_holiday_list(&self, id: &str) -> ClientResult<HolidayList>;
    async fn delete_holiday_list(&self, id: &str) -> ClientResult<()>;

    async fn list_holidays(&self, list_id: &str) -> ClientResult<Vec<Holiday>>;
    async fn create_holiday(&self, list_id: &str, payload: &HolidayCreate) -> ClientResult<Holiday>;
    async fn update_holiday(
        &self,
        list_id: &str,
        holiday_id: &str,
        payload: &HolidayUpdate,
    ) -> ClientResult<Holiday>;
    async fn delete_holiday(&self, list_id: &str, holiday_id: &str) -> ClientResult<()>;
    /// `POST /holiday-lists/:id/holidays/batch`, all or nothing
    async fn create_holidays_batch(
        &self,
        list_id: &str,
        batch: &HolidayBatch,
    ) -> ClientResult<Vec<Holiday>>;
}

#[async_trait]
impl HolidaysApi for HttpClient {
    async fn list_holiday_lists(&self, query: &HolidayListQuery) -> ClientResult<HolidayListPage> {
        let request = self
            .holiday_request(Method::GET, "holiday-lists")
            .query(&query.to_params());
        self.execute(request).await
    }

    async fn get_holiday_list(&self, id: &str) -> ClientResult<HolidayList> {
        self.execute(self.holiday_request(Method::GET, &format!("holiday-lists/{id}")))
            .await
    }

    async fn create_holiday_list(&self, payload: &HolidayListCreate) -> ClientResult<HolidayList> {
        self.execute(self.holiday_request(Method::POST, "holiday-lists").json(payload))
            .await
    }

    async fn update_holiday_list(
        &self,
        id: &str,
        payload: &HolidayListUpdate,
    ) -> ClientResult<HolidayList> {
        let request = self
            .holiday_request(Method::PUT, &format!("holiday-lists/{id}"))
            .json(payload);
        self.execute(request).await
    }

    async fn publish_holiday_list(&self, id: &str) -> ClientResult<HolidayList> {
        self.execute(self.holiday_request(Method::PUT, &format!("holiday-lists/{id}/publish")))
            .await
    }

    async fn archive_holiday_list(&self, id: &str) -> ClientResult<HolidayList> {
        self.execute(self.holiday_request(Method::PUT, &format!("holiday-lists/{id}/archive")))
            .await
    }

    async fn delete_holiday_list(&self, id: &str) -> ClientResult<()> {
        self.execute_empty(self.holiday_request(Method::DELETE, &format!("holiday-lists/{id}")))
            .await
    }

    async fn list_holidays(&self, list_id: &str) -> ClientResult<Vec<Holiday>> {
        self.execute(
            self.holiday_request(Method::GET, &format!("holiday-lists/{list_id}/holidays")),
        )
        .await
    }

    async fn create_holiday(&self, list_id: &str, payload: &HolidayCreate) -> ClientResult<Holiday> {
        let request = self
            .holiday_request(Method::POST, &format!("holiday-lists/{list_id}/holidays"))
            .json(payload);
        self.execute(request).await
    }

    async fn update_holiday(
        &self,
        list_id: &str,
        holiday_id: &str,
        payload: &HolidayUpdate,
    ) -> ClientResult<Holiday> {
        let path = format!("holiday-lists/{list_id}/holidays/{holiday_id}");
        self.execute(self.holiday_request(Method::PUT, &path).json(payload))
            .await
    }

    async fn delete_holiday(&self, list_id: &str, holiday_id: &str) -> ClientResult<()> {
        let path = format!("holiday-lists/{list_id}/holidays/{holiday_id}");
        self.execute_empty(self.holiday_request(Method::DELETE, &path))
            .await
    }

    async fn create_holidays_batch(
        &self,
        list_id: &str,
        batch: &HolidayBatch,
    ) -> ClientResult<Vec<Holiday>> {
        let path = format!("holiday-lists/{list_id}/holidays/batch");
        self.execute(self.holiday_request(Method::POST, &path).json(batch))
            .await
    }
}
