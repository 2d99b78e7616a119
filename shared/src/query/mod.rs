//! List query objects
//!
//! A view holds one query value describing its filters, sort order and page.
//! Builder methods return a new query and leave the receiver untouched;
//! `apply` derives the visible page from the fetched records without
//! mutating them.

pub mod goals;
pub mod holidays;
pub mod roles;

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub use goals::{GoalSort, GoalsQuery};
pub use holidays::{HolidayListQuery, HolidayListSort};
pub use roles::RolesQuery;

pub const DEFAULT_PER_PAGE: u32 = 10;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// One page of a derived list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Matching records before pagination
    pub total: u64,
    /// 1-based, clamped into `1..=total_pages`
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T: Clone> Page<T> {
    /// Slice `matching` into the requested page
    pub fn from_matching(matching: Vec<&T>, page: u32, per_page: u32) -> Self {
        let per_page = per_page.max(1);
        let total = matching.len() as u64;
        let total_pages = (matching.len() as u32).div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);
        let start = ((page - 1) * per_page) as usize;
        let items = matching
            .into_iter()
            .skip(start)
            .take(per_page as usize)
            .cloned()
            .collect();
        Self {
            items,
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Case-insensitive substring match; an empty needle matches everything
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Normalise a search box value
pub(crate) fn normalise_search(search: &str) -> Option<String> {
    let trimmed = search.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_slicing() {
        let data: Vec<u32> = (1..=25).collect();
        let page = Page::from_matching(data.iter().collect(), 3, 10);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert_eq!(page.total, 25);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_previous());
        assert!(!page.has_next());
    }

    #[test]
    fn test_page_is_clamped() {
        let data: Vec<u32> = (1..=5).collect();
        let page = Page::from_matching(data.iter().collect(), 9, 2);
        assert_eq!(page.page, 3);
        assert_eq!(page.items, vec![5]);

        let page = Page::from_matching(data.iter().collect(), 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
        assert_eq!(page.items, vec![1]);
    }

    #[test]
    fn test_empty_input_has_one_page() {
        let data: Vec<u32> = Vec::new();
        let page = Page::from_matching(data.iter().collect(), 1, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_search_helpers() {
        assert!(contains_ci("Quarterly Targets", "targ"));
        assert!(contains_ci("anything", ""));
        assert!(!contains_ci("Goals", "holiday"));
        assert_eq!(normalise_search("   "), None);
        assert_eq!(normalise_search(" q3 "), Some("q3".to_string()));
    }
}
