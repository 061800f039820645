//! In-memory Course Repository
//!
//! Same contract as [`PgCourseRepository`](super::postgres::PgCourseRepository).

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::CourseId;
use table_query::ListRequest;
use table_query::memory::evaluate;
use tokio::sync::RwLock;

use crate::domain::{Course, CourseRepository, Visibility};
use crate::error::CatalogResult;

#[derive(Clone, Default)]
pub struct InMemoryCourseRepository {
    courses: Arc<RwLock<HashMap<CourseId, Course>>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: &Course) -> CatalogResult<()> {
        self.courses.write().await.insert(course.id, course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> CatalogResult<Option<Course>> {
        Ok(self.courses.read().await.get(id).cloned())
    }

    async fn update(&self, course: &Course) -> CatalogResult<()> {
        if let Some(stored) = self.courses.write().await.get_mut(&course.id) {
            *stored = course.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &CourseId) -> CatalogResult<bool> {
        Ok(self.courses.write().await.remove(id).is_some())
    }

    async fn list(
        &self,
        request: &ListRequest,
        visibility: Visibility,
    ) -> CatalogResult<(Vec<Course>, u64)> {
        let rows: Vec<Course> = self.courses.read().await.values().cloned().collect();
        Ok(evaluate(
            &rows,
            request,
            visibility.columns(),
            visibility.base_condition(),
        ))
    }
}
