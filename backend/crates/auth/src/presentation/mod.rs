//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    AuthGuardState, CurrentUser, RoleGuardState, admin_only, protect, require_auth, require_role,
};
pub use router::{auth_router, auth_router_generic};
