//! Course Catalog Backend Module
//!
//! - `GET /courses`, `GET /courses/{id}`: public, published courses only
//! - `/admin/courses`: admin listing (drafts included) and CRUD
//!
//! Both listings run through `table_query` with their own column maps.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use domain::columns::{ADMIN_COURSE_COLUMNS, PUBLIC_COURSE_COLUMNS};
pub use error::{CatalogError, CatalogResult};
pub use infra::{memory::InMemoryCourseRepository, postgres::PgCourseRepository};
pub use presentation::router::{
    admin_courses_router, admin_courses_router_generic, courses_router, courses_router_generic,
};
