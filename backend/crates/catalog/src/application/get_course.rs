//! Get Course Use Case
//!
//! Unpublished courses do not exist for the public.

use std::sync::Arc;

use crate::application::parse_course_id;
use crate::domain::{Course, CourseRepository, Visibility};
use crate::error::{CatalogError, CatalogResult};

pub struct GetCourseUseCase<C>
where
    C: CourseRepository,
{
    repo: Arc<C>,
}

impl<C> GetCourseUseCase<C>
where
    C: CourseRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &str, visibility: Visibility) -> CatalogResult<Course> {
        let id = parse_course_id(id)?;
        self.repo
            .find_by_id(&id)
            .await?
            .filter(|course| visibility.can_see(course))
            .ok_or(CatalogError::NotFound)
    }
}
