//! Course catalog operations and the paged search stream.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use tracing::{debug, info, instrument};

use coursedesk_core::Result;
use coursedesk_core::catalog::{
    Course, CourseId, CourseSearchFilters, CourseSearchPage, CourseSearchQuery, PageRequest,
};

use crate::api::ApiCall;
use crate::api::endpoints::{COURSES, SEARCH_COURSES, course};
use crate::session::SessionManager;

/// Every page of a search, fetched one after another.
///
/// Ends after the page whose `hasNextPage` is false or that reaches
/// `totalPages`, or after the first error.
pub struct CoursePages {
    inner: Pin<Box<dyn Stream<Item = Result<CourseSearchPage>> + Send>>,
}

impl CoursePages {
    pub(crate) fn new<S>(stream: S) -> Self
    where
        S: Stream<Item = Result<CourseSearchPage>> + Send + 'static,
    {
        Self {
            inner: Box::pin(stream),
        }
    }
}

impl Stream for CoursePages {
    type Item = Result<CourseSearchPage>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

impl SessionManager {
    /// All courses.
    #[instrument(skip(self))]
    pub async fn courses(&self) -> Result<Vec<Course>> {
        let courses: Vec<Course> = self.execute(&ApiCall::get(COURSES)).await?.json()?;
        debug!(count = courses.len(), "Fetched courses");
        Ok(courses)
    }

    /// A single course.
    #[instrument(skip(self), fields(course_id = %id))]
    pub async fn course(&self, id: CourseId) -> Result<Course> {
        self.execute(&ApiCall::get(course(id.0))).await?.json()
    }

    /// One page of search results. Empty text filters are not sent.
    #[instrument(skip(self, filters), fields(page = page.page, page_size = page.page_size))]
    pub async fn search_courses(
        &self,
        filters: &CourseSearchFilters,
        page: PageRequest,
    ) -> Result<CourseSearchPage> {
        let filters = filters.clone().normalized();
        let call = ApiCall::get(SEARCH_COURSES).query(&CourseSearchQuery {
            filters: &filters,
            page,
        })?;
        let result: CourseSearchPage = self.execute(&call).await?.json()?;
        debug!(
            returned = result.courses.len(),
            total = result.total_count,
            total_pages = result.total_pages,
            "Search page fetched"
        );
        Ok(result)
    }

    /// Stream every page of a search, starting at page 1.
    pub fn search_pages(&self, filters: CourseSearchFilters, page_size: u32) -> CoursePages {
        let session = self.clone();
        info!(page_size, "Streaming search pages");

        let stream = async_stream::try_stream! {
            let mut request = PageRequest::first(page_size);
            loop {
                let page = session.search_courses(&filters, request).await?;
                let more = page.has_next_page && request.page < page.total_pages;
                yield page;
                match request.next() {
                    Some(next) if more => request = next,
                    _ => break,
                }
            }
        };

        CoursePages::new(stream)
    }
}
