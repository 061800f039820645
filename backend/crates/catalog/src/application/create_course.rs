//! Create Course Use Case

use std::sync::Arc;

use auth::models::FieldErrors;

use crate::domain::{Course, CourseLevel, CourseRepository, CourseTitle, PriceCents};
use crate::error::{CatalogError, CatalogResult};

pub struct CreateCourseInput {
    pub title: String,
    pub description: String,
    /// Defaults to `beginner` when empty
    pub level: String,
    pub price_cents: i64,
    pub published: bool,
}

pub struct CreateCourseUseCase<C>
where
    C: CourseRepository,
{
    repo: Arc<C>,
}

impl<C> CreateCourseUseCase<C>
where
    C: CourseRepository,
{
    pub fn new(repo: Arc<C>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateCourseInput) -> CatalogResult<Course> {
        let mut errors = FieldErrors::new();
        let title = errors.check(CourseTitle::new(&input.title));
        let level = if input.level.trim().is_empty() {
            Some(CourseLevel::default())
        } else {
            errors.check(CourseLevel::parse(&input.level))
        };
        let price = errors.check(PriceCents::new(input.price_cents));

        let (Some(title), Some(level), Some(price)) = (title, level, price) else {
            return Err(CatalogError::InvalidInput(errors.into_vec()));
        };

        let course = Course::new(
            title,
            input.description.trim().to_string(),
            level,
            price,
            input.published,
        );
        self.repo.create(&course).await?;

        tracing::info!(course_id = %course.id, published = course.published, "Course created");

        Ok(course)
    }
}
