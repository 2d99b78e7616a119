//! Holiday Model

use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_date, validate_optional_text, validate_required_text,
    validate_year,
};

/// Holiday list status, strictly forward-moving
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl HolidayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Archived => "ARCHIVED",
        }
    }
}

/// Calendar holiday entry, owned by one holiday list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holiday {
    pub id: String,
    pub name: String,
    /// YYYY-MM-DD
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Holiday {
    /// Same calendar entry (name and date), ignoring ids and timestamps
    pub fn matches(&self, other: &HolidayCreate) -> bool {
        self.name.trim().eq_ignore_ascii_case(other.name.trim()) && self.date == other.date
    }
}

/// Year-scoped collection of holidays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayList {
    pub id: String,
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: HolidayStatus,
    #[serde(default)]
    pub holidays: Vec<Holiday>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `POST /holiday-lists`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayListCreate {
    pub name: String,
    pub year: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: HolidayStatus,
}

impl HolidayListCreate {
    pub fn new(name: impl Into<String>, year: i32) -> Self {
        Self {
            name: name.into(),
            year,
            description: String::new(),
            status: HolidayStatus::Draft,
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.name, "List name", MAX_NAME_LEN)?;
        validate_year(self.year)?;
        validate_optional_text(&self.description, "Description", MAX_NOTE_LEN)
    }
}

/// `PUT /holiday-lists/:id` (partial)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayListUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl HolidayListUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            validate_required_text(name, "List name", MAX_NAME_LEN)?;
        }
        if let Some(year) = self.year {
            validate_year(year)?;
        }
        if let Some(description) = &self.description {
            validate_optional_text(description, "Description", MAX_NOTE_LEN)?;
        }
        Ok(())
    }
}

/// `POST /holiday-lists/:id/holidays`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayCreate {
    pub name: String,
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_recurring: bool,
}

impl HolidayCreate {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            description: String::new(),
            is_recurring: false,
        }
    }

    pub fn recurring(mut self) -> Self {
        self.is_recurring = true;
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_required_text(&self.name, "Holiday name", MAX_NAME_LEN)?;
        validate_date(&self.date, "Holiday date")?;
        validate_optional_text(&self.description, "Description", MAX_NOTE_LEN)
    }
}

/// `PUT /holiday-lists/:id/holidays/:holidayId`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_recurring: Option<bool>,
}

impl HolidayUpdate {
    pub fn validate(&self) -> AppResult<()> {
        if let Some(name) = &self.name {
            validate_required_text(name, "Holiday name", MAX_NAME_LEN)?;
        }
        if let Some(date) = &self.date {
            validate_date(date, "Holiday date")?;
        }
        if let Some(description) = &self.description {
            validate_optional_text(description, "Description", MAX_NOTE_LEN)?;
        }
        Ok(())
    }
}

/// `POST /holiday-lists/:id/holidays/batch`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayBatch {
    pub holidays: Vec<HolidayCreate>,
}

/// `GET /holiday-lists` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayListPage {
    pub lists: Vec<HolidayList>,
    pub total: u64,
}
