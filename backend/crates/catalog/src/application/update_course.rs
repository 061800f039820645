//! Update Course Use Case
//!
//! Partial update: absent fields stay as they are.

use std::sync::Arc;

use auth::models::FieldErrors;

use crate::application::parse_course_id;
use crate::domain::{Course, CourseLevel, CourseRepository, CourseTitle, PriceCents};
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Default)]
pub struct UpdateCourseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub price_cents: Option<i64>,
    pub published: Option<bool>,
}

pub struct UpdateCourseUseCase<C>
where
    C: CourseRepository,
{
    repo: Arc<C>,
}

impl<C> UpdateCourseUseCase<C>
where
    C: CourseRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: &str, input: UpdateCourseInput) -> CatalogResult<Course> {
        let id = parse_course_id(id)?;

        let mut errors = FieldErrors::new();
        let title = input.title.map(|t| errors.check(CourseTitle::new(&t)));
        let level = input.level.map(|l| errors.check(CourseLevel::parse(&l)));
        let price = input.price_cents.map(|p| errors.check(PriceCents::new(p)));
        if !errors.is_empty() {
            return Err(CatalogError::InvalidInput(errors.into_vec()));
        }

        let mut course = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or(CatalogError::NotFound)?;

        if let Some(title) = title.flatten() {
            course.title = title;
        }
        if let Some(description) = input.description {
            course.description = description.trim().to_string();
        }
        if let Some(level) = level.flatten() {
            course.level = level;
        }
        if let Some(price) = price.flatten() {
            course.price_cents = price;
        }
        if let Some(published) = input.published {
            course.published = published;
        }
        course.touch();

        self.repo.update(&course).await?;

        tracing::info!(course_id = %course.id, published = course.published, "Course updated");

        Ok(course)
    }
}
