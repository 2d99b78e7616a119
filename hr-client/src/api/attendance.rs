use async_trait::async_trait;
use shared::models::AttendanceStatus;

use crate::{ClientResult, HttpClient};

/// Today's clock-in / clock-out for the current employee
#[async_trait]
pub trait AttendanceApi: Send + Sync {
    /// `GET /attendance/status`
    async fn attendance_status(&self) -> ClientResult<AttendanceStatus>;
    /// `POST /attendance/clock-in`
    async fn clock_in(&self) -> ClientResult<AttendanceStatus>;
    /// `POST /attendance/clock-out`
    async fn clock_out(&self) -> ClientResult<AttendanceStatus>;
}

#[async_trait]
impl AttendanceApi for HttpClient {
    async fn attendance_status(&self) -> ClientResult<AttendanceStatus> {
        self.get("attendance/status").await
    }

    async fn clock_in(&self) -> ClientResult<AttendanceStatus> {
        self.post_empty("attendance/clock-in").await
    }

    async fn clock_out(&self) -> ClientResult<AttendanceStatus> {
        self.post_empty("attendance/clock-out").await
    }
}
