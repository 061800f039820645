//! Domain Layer

pub mod columns;
pub mod repository;
pub mod summary;

pub use repository::UserListRepository;
pub use summary::UserSummary;
