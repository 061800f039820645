//! Repository Traits

use kernel::id::CourseId;
use table_query::{ColumnMap, Condition, ListRequest};

use crate::domain::columns::{ADMIN_COURSE_COLUMNS, PUBLIC_COURSE_COLUMNS, PUBLISHED};
use crate::domain::course::Course;
use crate::error::CatalogResult;

/// Which courses a caller may see
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Published courses only, public column map
    Public,
    /// Everything, admin column map
    Admin,
}

impl Visibility {
    pub fn columns(self) -> &'static ColumnMap {
        match self {
            Visibility::Public => &PUBLIC_COURSE_COLUMNS,
            Visibility::Admin => &ADMIN_COURSE_COLUMNS,
        }
    }

    /// Condition applied on top of any client filters
    pub fn base_condition(self) -> Option<Condition> {
        match self {
            Visibility::Public => Some(Condition::is(&PUBLISHED, true)),
            Visibility::Admin => None,
        }
    }

    pub fn can_see(self, course: &Course) -> bool {
        self == Visibility::Admin || course.published
    }
}

#[trait_variant::make(CourseRepository: Send)]
pub trait LocalCourseRepository {
    async fn create(&self, course: &Course) -> CatalogResult<()>;

    async fn find_by_id(&self, id: &CourseId) -> CatalogResult<Option<Course>>;

    async fn update(&self, course: &Course) -> CatalogResult<()>;

    /// Returns false when no such course existed.
    async fn delete(&self, id: &CourseId) -> CatalogResult<bool>;

    /// One page of courses plus the filtered total.
    async fn list(
        &self,
        request: &ListRequest,
        visibility: Visibility,
    ) -> CatalogResult<(Vec<Course>, u64)>;
}
