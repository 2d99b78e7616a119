//! Clock-in / clock-out
//!
//! Both actions are one-shot per day, and only one request may be
//! outstanding at a time; a second click while a request is in flight is
//! refused instead of queued.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::AttendanceStatus;
use tokio::sync::RwLock;

use crate::api::{AttendanceApi, HrBackend};
use crate::error::{Operation, OperationExt};

/// Clears the in-flight flag when the request ends, however it ends
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> AppResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| AppError::new(ErrorCode::RequestInFlight))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Clone)]
pub struct AttendanceService {
    backend: Arc<dyn HrBackend>,
    status: Arc<RwLock<Option<AttendanceStatus>>>,
    in_flight: Arc<AtomicBool>,
}

impl AttendanceService {
    pub fn new(backend: Arc<dyn HrBackend>) -> Self {
        Self {
            backend,
            status: Arc::new(RwLock::new(None)),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Last status seen, if any
    pub async fn current(&self) -> Option<AttendanceStatus> {
        self.status.read().await.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Fetch today's status. Failures surface like any other operation.
    pub async fn refresh(&self) -> AppResult<AttendanceStatus> {
        let status = self
            .backend
            .attendance_status()
            .await
            .for_op(Operation::LoadAttendance)?;
        *self.status.write().await = Some(status.clone());
        Ok(status)
    }

    pub async fn clock_in(&self) -> AppResult<AttendanceStatus> {
        if let Some(status) = self.current().await
            && !status.can_clock_in()
        {
            tracing::warn!("Clock-in refused: already clocked in today");
            return Err(AppError::new(ErrorCode::AlreadyClockedIn));
        }
        let _guard = InFlight::acquire(&self.in_flight)?;
        let status = self.backend.clock_in().await.for_op(Operation::ClockIn)?;
        tracing::info!(at = ?status.clock_in_time, "Clocked in");
        *self.status.write().await = Some(status.clone());
        Ok(status)
    }

    /// Requires a clock-in today and no clock-out yet
    pub async fn clock_out(&self) -> AppResult<AttendanceStatus> {
        let current = self.current().await.unwrap_or_default();
        if current.clock_in_time.is_none() {
            tracing::warn!("Clock-out refused: not clocked in");
            return Err(AppError::new(ErrorCode::NotClockedIn));
        }
        if current.clock_out_time.is_some() {
            tracing::warn!("Clock-out refused: already clocked out");
            return Err(AppError::new(ErrorCode::AlreadyClockedOut));
        }
        let _guard = InFlight::acquire(&self.in_flight)?;
        let status = self.backend.clock_out().await.for_op(Operation::ClockOut)?;
        tracing::info!(at = ?status.clock_out_time, "Clocked out");
        *self.status.write().await = Some(status.clone());
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockBackend;
    use std::time::Duration;

    #[tokio::test]
    async fn test_full_day() {
        let backend = MockBackend::new();
        let service = AttendanceService::new(Arc::new(backend.clone()));

        assert_eq!(
            service.clock_out().await.unwrap_err().code,
            ErrorCode::NotClockedIn
        );
        assert_eq!(backend.call_count().await, 0);

        let status = service.clock_in().await.unwrap();
        assert!(status.clocked_in);
        assert_eq!(
            service.clock_in().await.unwrap_err().code,
            ErrorCode::AlreadyClockedIn
        );

        let status = service.clock_out().await.unwrap();
        assert!(!status.clocked_in);
        assert!(status.clock_out_time.is_some());
        assert_eq!(
            service.clock_out().await.unwrap_err().code,
            ErrorCode::AlreadyClockedOut
        );
        assert_eq!(
            backend.calls().await,
            vec!["POST /attendance/clock-in", "POST /attendance/clock-out"]
        );
    }

    #[tokio::test]
    async fn test_second_click_while_in_flight_is_refused() {
        let backend = MockBackend::new().with_latency(Duration::from_millis(100));
        let service = AttendanceService::new(Arc::new(backend.clone()));

        let first = tokio::spawn({
            let service = service.clone();
            async move { service.clock_in().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(service.is_busy());
        assert_eq!(
            service.clock_in().await.unwrap_err().code,
            ErrorCode::RequestInFlight
        );

        assert!(first.await.unwrap().is_ok());
        assert!(!service.is_busy());
        assert_eq!(backend.call_count().await, 1);
    }

    #[tokio::test]
    async fn test_flag_cleared_after_failure() {
        let backend = MockBackend::new();
        backend.fail("POST /attendance/clock-in").await;
        let service = AttendanceService::new(Arc::new(backend.clone()));

        let err = service.clock_in().await.unwrap_err();
        assert_eq!(err.message, "Failed to clock in. Please try again.");
        assert!(!service.is_busy());

        backend.recover("POST /attendance/clock-in").await;
        assert!(service.clock_in().await.is_ok());
    }

    #[tokio::test]
    async fn test_status_failure_uses_banner_message() {
        let backend = MockBackend::new();
        backend.fail("GET /attendance/status").await;
        let service = AttendanceService::new(Arc::new(backend));
        let err = service.refresh().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert_eq!(
            err.message,
            "Failed to load attendance status. Please try again."
        );
        assert!(service.current().await.is_none());
    }

    #[tokio::test]
    async fn test_refresh_seeds_guards() {
        let backend = MockBackend::new();
        backend
            .set_attendance(AttendanceStatus {
                clocked_in: true,
                clock_in_time: Some("2025-03-03T09:00:00Z".into()),
                clock_out_time: None,
                date: "2025-03-03".into(),
            })
            .await;
        let service = AttendanceService::new(Arc::new(backend));
        service.refresh().await.unwrap();
        assert_eq!(
            service.clock_in().await.unwrap_err().code,
            ErrorCode::AlreadyClockedIn
        );
        assert!(service.clock_out().await.is_ok());
    }
}
