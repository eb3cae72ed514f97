//! Course catalog types, search state and pagination.

mod pagination;
mod search;
mod types;

pub use pagination::{MAX_VISIBLE_PAGES, PageItem, page_window};
pub use search::{PricePreset, SearchState};
pub use types::{
    Course, CourseId, CourseSearchFilters, CourseSearchPage, CourseSearchQuery,
    DEFAULT_PAGE_SIZE, FilterUpdate, PageRequest,
};
