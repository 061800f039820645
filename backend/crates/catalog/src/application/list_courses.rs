//! List Courses Use Case

use std::sync::Arc;

use table_query::{ListRequest, PaginatedResult, paginate};

use crate::domain::{Course, CourseRepository, Visibility};
use crate::error::CatalogResult;

pub struct ListCoursesUseCase<C>
where
    C: CourseRepository,
{
    repo: Arc<C>,
}

impl<C> ListCoursesUseCase<C>
where
    C: CourseRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        request: &ListRequest,
        visibility: Visibility,
    ) -> CatalogResult<PaginatedResult<Course>> {
        let (rows, total) = self.repo.list(request, visibility).await?;

        tracing::debug!(
            ?visibility,
            page = request.pagination.page,
            limit = request.pagination.limit,
            total,
            "Listed courses"
        );

        Ok(paginate(rows, total, request.pagination))
    }
}
