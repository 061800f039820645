//! Reset Password Use Case
//!
//! Consumes a reset token, stores the new hash and revokes every outstanding
//! token of the user, the reset token included.

use std::sync::Arc;

use chrono::Utc;
use platform::crypto::token_digest;

use crate::application::config::AuthConfig;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{
    token_type::TokenType,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct ResetPasswordInput {
    pub token: String,
    pub password: String,
}

pub struct ResetPasswordUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> ResetPasswordUseCase<U, T>
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

    pub async fn execute(&self, input: ResetPasswordInput) -> AuthResult<()> {
        let token = input.token.trim();
        if token.is_empty() {
            return Err(AuthError::InvalidResetToken);
        }

        let record = self
            .token_repo
            .find_by_hash(&token_digest(token))
            .await?
            .filter(|r| r.is_usable_as(TokenType::PasswordReset, Utc::now()))
            .ok_or(AuthError::InvalidResetToken)?;

        // Policy failure leaves the token usable for another attempt
        let raw = RawPassword::new(input.password).map_err(AuthError::invalid_field)?;

        let mut user = self
            .user_repo
            .find_by_id(&record.user_id)
            .await?
            .ok_or(AuthError::InvalidResetToken)?;

        user.set_password(UserPassword::from_raw(&raw, self.config.pepper())?);
        self.user_repo.update(&user).await?;

        let revoked = self.token_repo.revoke_all_for_user(&user.id).await?;

        tracing::info!(user_id = %user.id, revoked_tokens = revoked, "Password reset");

        Ok(())
    }
}
