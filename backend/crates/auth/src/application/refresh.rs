//! Refresh Use Case
//!
//! Exchanges a refresh token for a new pair. The presented token is revoked,
//! so each refresh token works once.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::tokens::{TokenPair, issue_pair, verify_jwt};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::token_type::TokenType;
use crate::error::{AuthError, AuthResult};

pub struct RefreshUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> RefreshUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    pub fn new(user_repo: Arc<U>, token_repo: Arc<T>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            token_repo,
            config,
        }
    }

    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<TokenPair> {
        let token = refresh_token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::RefreshTokenRequired)?;

        let (claims, record) =
            verify_jwt(self.token_repo.as_ref(), &self.config, token, TokenType::Refresh)
                .await?
                .ok_or(AuthError::InvalidRefreshToken)?;

        let user = self
            .user_repo
            .find_by_id(&claims.user_id())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        // A concurrent refresh may have consumed the token since it was verified
        if !self.token_repo.revoke(&record.id).await? {
            return Err(AuthError::InvalidRefreshToken);
        }
        let tokens = issue_pair(self.token_repo.as_ref(), &self.config, &user).await?;

        tracing::debug!(user_id = %user.id, "Tokens refreshed");

        Ok(tokens)
    }
}
