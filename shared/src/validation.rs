//! Input validation helpers
//!
//! Checks run before any request leaves the client. Failures are
//! [`AppError`]s in the validation categories and are shown inline.

use chrono::NaiveDate;

use crate::error::{AppError, AppResult, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: goals, groups, holiday lists, holidays, roles
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions and comments
pub const MAX_NOTE_LEN: usize = 2000;

// ── Numeric ranges ──────────────────────────────────────────────────

pub const MIN_HOLIDAY_YEAR: i32 = 2000;
pub const MAX_HOLIDAY_YEAR: i32 = 2100;

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    validate_optional_text(value, field, max_len)
}

/// Validate that a possibly-empty string is within the length limit.
pub fn validate_optional_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        )));
    }
    Ok(())
}

/// Validate a `YYYY-MM-DD` date string.
///
/// The value is sent as-is, so surrounding whitespace is rejected rather
/// than trimmed.
pub fn validate_date(value: &str, field: &str) -> AppResult<NaiveDate> {
    let invalid = || {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("{field} must be a date in YYYY-MM-DD format"),
        )
        .with_detail("field", field)
    };
    // chrono skips leading whitespace before numeric fields
    if value.trim() != value {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Validate a holiday list year
pub fn validate_year(year: i32) -> AppResult<()> {
    if !(MIN_HOLIDAY_YEAR..=MAX_HOLIDAY_YEAR).contains(&year) {
        return Err(AppError::new(ErrorCode::HolidayYearOutOfRange).with_detail("year", year));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Diwali", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.message, "name must not be empty");
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text_allows_empty() {
        assert!(validate_optional_text("", "description", MAX_NOTE_LEN).is_ok());
    }

    #[test]
    fn test_validate_date() {
        let date = validate_date("2025-01-26", "date").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 1, 26).unwrap());
        let err = validate_date("26/01/2025", "date").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_validate_date_rejects_padding() {
        for padded in [" 2026-01-01", "2026-01-01 ", "2026-01-01\n"] {
            assert_eq!(
                validate_date(padded, "date").unwrap_err().code,
                ErrorCode::InvalidFormat
            );
        }
    }

    #[test]
    fn test_validate_year_bounds() {
        assert!(validate_year(2000).is_ok());
        assert!(validate_year(2100).is_ok());
        assert_eq!(
            validate_year(1999).unwrap_err().code,
            ErrorCode::HolidayYearOutOfRange
        );
        assert!(validate_year(2101).is_err());
    }
}
