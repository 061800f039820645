//! Domain Layer

pub mod columns;
pub mod course;
pub mod repository;
pub mod value_object;

pub use course::Course;
pub use repository::{CourseRepository, Visibility};
pub use value_object::{CourseLevel, CourseTitle, PriceCents};
