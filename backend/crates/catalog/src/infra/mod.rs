//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryCourseRepository;
pub use postgres::PgCourseRepository;
