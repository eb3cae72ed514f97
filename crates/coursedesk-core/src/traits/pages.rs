//! Search page stream trait.

use futures_core::Stream;

use crate::Result;
use crate::catalog::CourseSearchPage;

/// Stream of consecutive search result pages.
pub trait PageStream: Stream<Item = Result<CourseSearchPage>> + Send {}

impl<T> PageStream for T where T: Stream<Item = Result<CourseSearchPage>> + Send {}
