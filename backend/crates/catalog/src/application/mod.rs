//! Application Layer

pub mod create_course;
pub mod delete_course;
pub mod get_course;
pub mod list_courses;
pub mod update_course;

pub use create_course::{CreateCourseInput, CreateCourseUseCase};
pub use delete_course::DeleteCourseUseCase;
pub use get_course::GetCourseUseCase;
pub use list_courses::ListCoursesUseCase;
pub use update_course::{UpdateCourseInput, UpdateCourseUseCase};

use kernel::id::CourseId;

use crate::error::{CatalogError, CatalogResult};

/// A path id that is not a UUID names no course.
pub(crate) fn parse_course_id(raw: &str) -> CatalogResult<CourseId> {
    CourseId::parse(raw.trim()).map_err(|_| CatalogError::NotFound)
}
