//! Delete Course Use Case

use std::sync::Arc;

use crate::application::parse_course_id;
use crate::domain::CourseRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct DeleteCourseUseCase<C>
where
    C: CourseRepository,
{
    repo: Arc<C>,
}

impl<C> DeleteCourseUseCase<C>
where
    C: CourseRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &str) -> CatalogResult<()> {
        let id = parse_course_id(id)?;
        if !self.repo.delete(&id).await? {
            return Err(CatalogError::NotFound);
        }

        tracing::info!(course_id = %id, "Course deleted");

        Ok(())
    }
}
