//! Attendance Model

use serde::{Deserialize, Serialize};

/// Today's attendance state for the current employee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatus {
    #[serde(default)]
    pub clocked_in: bool,
    /// ISO 8601 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_in_time: Option<String>,
    /// ISO 8601 timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_out_time: Option<String>,
    /// YYYY-MM-DD
    #[serde(default)]
    pub date: String,
}

impl AttendanceStatus {
    /// Clock-in is a one-shot action per day
    pub fn can_clock_in(&self) -> bool {
        self.clock_in_time.is_none()
    }

    /// Clock-out requires a prior clock-in and no existing clock-out
    pub fn can_clock_out(&self) -> bool {
        self.clock_in_time.is_some() && self.clock_out_time.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_conditions() {
        let mut status = AttendanceStatus::default();
        assert!(status.can_clock_in());
        assert!(!status.can_clock_out());

        status.clocked_in = true;
        status.clock_in_time = Some("2025-03-03T09:00:00Z".into());
        assert!(!status.can_clock_in());
        assert!(status.can_clock_out());

        status.clock_out_time = Some("2025-03-03T17:30:00Z".into());
        assert!(!status.can_clock_out());
    }
}
