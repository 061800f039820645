//! Repository Traits
//!
//! Interfaces for data persistence. Implementations live in the
//! infrastructure layer.

use kernel::id::{IssuedTokenId, UserId};

use crate::domain::entity::{issued_token::IssuedToken, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Fails with `EmailAlreadyExists` on a duplicate email
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Fails with `EmailAlreadyExists` on a duplicate email
    async fn update(&self, user: &User) -> AuthResult<()>;

    /// Returns false when no such user existed.
    async fn delete(&self, id: &UserId) -> AuthResult<bool>;
}

/// Issued token records (the denylist).
#[trait_variant::make(TokenRepository: Send)]
pub trait LocalTokenRepository {
    async fn create(&self, token: &IssuedToken) -> AuthResult<()>;

    async fn find_by_hash(&self, token_hash: &[u8]) -> AuthResult<Option<IssuedToken>>;

    /// Returns false when the token was already revoked or is unknown.
    async fn revoke(&self, id: &IssuedTokenId) -> AuthResult<bool>;

    /// Revoke every unrevoked token of the user. Returns the count.
    async fn revoke_all_for_user(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Delete records past their expiry. Returns the count.
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
