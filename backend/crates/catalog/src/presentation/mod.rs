//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CatalogAppState;
pub use router::{
    admin_courses_router, admin_courses_router_generic, courses_router, courses_router_generic,
};
