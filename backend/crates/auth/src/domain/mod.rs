//! Domain Layer
//!
//! Contains entities, value objects, repository traits and token claims.

pub mod claims;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use claims::{Claims, JwtError};
pub use entity::{issued_token::IssuedToken, user::User};
pub use repository::{TokenRepository, UserRepository};
