//! Course catalog types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of courses per search page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Numeric course identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub i64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A course, as returned by the list, read and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(alias = "id")]
    pub course_id: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub level: String,
    pub price: f64,
}

impl Course {
    pub fn is_free(&self) -> bool {
        self.price == 0.0
    }
}

/// Search filters; absent fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
}

impl CourseSearchFilters {
    /// Drop empty text filters so they are omitted from the query.
    pub fn normalized(mut self) -> Self {
        for field in [&mut self.search, &mut self.category, &mut self.level] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }
}

/// A change to apply to [`CourseSearchFilters`].
///
/// `None` leaves a field alone; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterUpdate {
    pub search: Option<Option<String>>,
    pub category: Option<Option<String>>,
    pub level: Option<Option<String>>,
    pub min_price: Option<Option<f64>>,
    pub max_price: Option<Option<f64>>,
    pub page_size: Option<u32>,
}

/// One-based page and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    pub fn first(page_size: u32) -> Self {
        Self::new(1, page_size)
    }

    /// The following page, or `None` past `u32::MAX`.
    pub fn next(&self) -> Option<Self> {
        let page = self.page.checked_add(1)?;
        Some(Self::new(page, self.page_size))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// Query string of the search endpoint.
#[derive(Debug, Serialize)]
pub struct CourseSearchQuery<'a> {
    #[serde(flatten)]
    pub filters: &'a CourseSearchFilters,
    #[serde(flatten)]
    pub page: PageRequest,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSearchPage {
    pub courses: Vec<Course>,
    pub total_count: u64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}
