//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::UsersAppState;
pub use router::{users_router, users_router_generic};
