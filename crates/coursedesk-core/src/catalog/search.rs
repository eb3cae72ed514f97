//! Client-side search state: filters, current page and totals.

use crate::Result;
use crate::error::InvalidInputError;

use super::types::{
    CourseSearchFilters, CourseSearchPage, DEFAULT_PAGE_SIZE, FilterUpdate, PageRequest,
};

/// Preset price ranges offered next to the free-form min/max inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricePreset {
    Any,
    Free,
    Under100,
    From100To300,
    Over300,
}

impl PricePreset {
    /// The `(min, max)` bounds this preset sets.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            PricePreset::Any => (None, None),
            PricePreset::Free => (Some(0.0), Some(0.0)),
            PricePreset::Under100 => (Some(0.0), Some(99.99)),
            PricePreset::From100To300 => (Some(100.0), Some(300.0)),
            PricePreset::Over300 => (Some(300.01), None),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PricePreset::Any => "Alla priser",
            PricePreset::Free => "Gratis",
            PricePreset::Under100 => "Under 100 kr",
            PricePreset::From100To300 => "100 - 300 kr",
            PricePreset::Over300 => "Över 300 kr",
        }
    }
}

/// Search filters plus pagination position.
///
/// Any filter change moves back to page 1; page changes are accepted only
/// within the totals of the last applied response.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    filters: CourseSearchFilters,
    page_size: u32,
    current_page: u32,
    total_pages: u32,
    total_count: u64,
    has_next_page: bool,
    has_previous_page: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new(CourseSearchFilters::default())
    }
}

impl SearchState {
    pub fn new(filters: CourseSearchFilters) -> Self {
        Self {
            filters,
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            total_pages: 0,
            total_count: 0,
            has_next_page: false,
            has_previous_page: false,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn filters(&self) -> &CourseSearchFilters {
        &self.filters
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    pub fn has_previous_page(&self) -> bool {
        self.has_previous_page
    }

    /// The page to request next.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.current_page, self.page_size)
    }

    /// Merge a filter change and reset to the first page.
    pub fn update_filters(&mut self, update: FilterUpdate) {
        let FilterUpdate {
            search,
            category,
            level,
            min_price,
            max_price,
            page_size,
        } = update;

        if let Some(search) = search {
            self.filters.search = search;
        }
        if let Some(category) = category {
            self.filters.category = category;
        }
        if let Some(level) = level {
            self.filters.level = level;
        }
        if let Some(min_price) = min_price {
            self.filters.min_price = min_price;
        }
        if let Some(max_price) = max_price {
            self.filters.max_price = max_price;
        }
        if let Some(page_size) = page_size {
            self.page_size = page_size.max(1);
        }
        self.current_page = 1;
    }

    /// Replace both price bounds with a preset.
    pub fn apply_price_preset(&mut self, preset: PricePreset) {
        let (min, max) = preset.bounds();
        self.update_filters(FilterUpdate {
            min_price: Some(min),
            max_price: Some(max),
            ..Default::default()
        });
    }

    /// Move to `page` if it lies within `1..=total_pages`.
    pub fn change_page(&mut self, page: u32) -> Result<()> {
        if page >= 1 && page <= self.total_pages {
            self.current_page = page;
            Ok(())
        } else {
            Err(InvalidInputError::PageOutOfRange {
                page,
                total: self.total_pages,
            }
            .into())
        }
    }

    /// Record totals from a search response.
    ///
    /// The current page is pulled back into range when the result set
    /// shrank.
    pub fn apply(&mut self, page: &CourseSearchPage) {
        self.total_pages = page.total_pages;
        if self.total_pages > 0 {
            self.current_page = self.current_page.clamp(1, self.total_pages);
        }
        self.total_count = page.total_count;
        self.has_next_page = page.has_next_page;
        self.has_previous_page = page.has_previous_page;
    }
}
