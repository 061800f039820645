//! Authenticate Use Case
//!
//! Resolves a bearer access token to the caller.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::tokens::verify_jwt;
use crate::domain::repository::TokenRepository;
use crate::domain::value_object::{token_type::TokenType, user_role::UserRole};
use crate::error::{AuthError, AuthResult};

/// The authenticated caller, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: UserId,
    /// Role at issue time; `require_role` re-reads the current one
    pub role: UserRole,
    /// The raw bearer token, kept for logout
    pub token: String,
}

pub struct AuthenticateUseCase<T>
where
    T: TokenRepository,
{
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<T> AuthenticateUseCase<T>
where
    T: TokenRepository,
{
    pub fn new(token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self { token_repo, config }
    }

    pub async fn execute(&self, token: &str) -> AuthResult<AuthContext> {
        let (claims, _) = verify_jwt(self.token_repo.as_ref(), &self.config, token, TokenType::Access)
            .await?
            .ok_or(AuthError::Unauthenticated)?;

        Ok(AuthContext {
            user_id: claims.user_id(),
            role: claims.role,
            token: token.to_string(),
        })
    }
}
