//! Holiday lists query
//!
//! `year` and `status` are also sent to the backend as query parameters;
//! `apply` re-checks them so mock and HTTP backends yield the same page.

use serde::{Deserialize, Serialize};

use super::{DEFAULT_PER_PAGE, Page, SortDirection, contains_ci, normalise_search};
use crate::models::{HolidayList, HolidayStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HolidayListSort {
    Name,
    #[default]
    Year,
    HolidayCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayListQuery {
    pub search: Option<String>,
    pub year: Option<i32>,
    pub status: Option<HolidayStatus>,
    pub sort: HolidayListSort,
    pub direction: SortDirection,
    pub page: u32,
    pub per_page: u32,
}

impl Default for HolidayListQuery {
    fn default() -> Self {
        Self {
            search: None,
            year: None,
            status: None,
            sort: HolidayListSort::default(),
            direction: SortDirection::Desc,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl HolidayListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(&self, search: &str) -> Self {
        Self {
            search: normalise_search(search),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_year(&self, year: Option<i32>) -> Self {
        Self {
            year,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_status(&self, status: Option<HolidayStatus>) -> Self {
        Self {
            status,
            page: 1,
            ..self.clone()
        }
    }

    pub fn sorted_by(&self, sort: HolidayListSort, direction: SortDirection) -> Self {
        Self {
            sort,
            direction,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Server-side filters for `GET /holiday-lists`
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }

    pub fn matches(&self, list: &HolidayList) -> bool {
        self.year.is_none_or(|y| y == list.year)
            && self.status.is_none_or(|s| s == list.status)
            && self
                .search
                .as_deref()
                .is_none_or(|q| contains_ci(&list.name, q) || contains_ci(&list.description, q))
    }

    pub fn apply(&self, lists: &[HolidayList]) -> Page<HolidayList> {
        let mut matching: Vec<&HolidayList> = lists.iter().filter(|l| self.matches(l)).collect();
        matching.sort_by(|a, b| {
            let ordering = match self.sort {
                HolidayListSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                HolidayListSort::Year => a.year.cmp(&b.year).then_with(|| a.name.cmp(&b.name)),
                HolidayListSort::HolidayCount => a.holidays.len().cmp(&b.holidays.len()),
            };
            self.direction.apply(ordering)
        });
        Page::from_matching(matching, self.page, self.per_page)
    }
}
