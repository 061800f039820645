//! Sign Out Use Case
//!
//! Revokes the presented access token and, when given, the refresh token.
//! Tokens that are unknown or already revoked are ignored.

use std::sync::Arc;

use platform::crypto::token_digest;

use crate::domain::repository::TokenRepository;
use crate::error::AuthResult;

pub struct SignOutUseCase<T>
where
    T: TokenRepository,
{
    token_repo: Arc<T>,
}

impl<T> SignOutUseCase<T>
where
    T: TokenRepository,
{
    pub fn new(token_repo: Arc<T>) -> Self {
        Self { token_repo }
    }

    pub async fn execute(&self, access_token: &str, refresh_token: Option<&str>) -> AuthResult<()> {
        let tokens = std::iter::once(access_token).chain(refresh_token.filter(|t| !t.is_empty()));

        for token in tokens {
            let Some(record) = self.token_repo.find_by_hash(&token_digest(token)).await? else {
                continue;
            };
            if !self.token_repo.revoke(&record.id).await? {
                continue;
            }
            tracing::debug!(
                user_id = %record.user_id,
                token_type = %record.token_type,
                "Token revoked"
            );
        }

        Ok(())
    }
}
