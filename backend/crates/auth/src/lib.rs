//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits, JWT claims
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Sign up / log in with email + password
//! - Access (15 min) and refresh (30 days) JWTs, refresh rotation
//! - Logout and password reset revoke tokens server-side
//! - Forgot-password mail with a one-hour reset link
//! - `require_auth` / `require_role` middleware for other crates
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B policy)
//! - Tokens are stored as SHA-256 digests only
//! - A valid signature is not enough: the token record must exist, be
//!   unrevoked, unexpired and of the expected type

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{AuthContext, TokenPair};
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::{issued_token::IssuedToken, user::User};
    pub use crate::domain::value_object::{
        FieldError, FieldErrors, display_name::DisplayName, email::Email, field_details,
        token_type::TokenType, user_password::RawPassword, user_password::UserPassword,
        user_role::UserRole,
    };
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::domain::repository::{TokenRepository, UserRepository};
    pub use crate::infra::postgres::PgAuthRepository as AuthStore;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
