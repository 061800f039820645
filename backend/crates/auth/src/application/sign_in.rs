//! Sign In Use Case
//!
//! Verifies email + password and issues an access / refresh pair.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::sign_up::SessionOutput;
use crate::application::tokens::issue_pair;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> SignInUseCase<U, T>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SessionOutput> {
        // A malformed email cannot belong to anyone
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw = RawPassword::for_login(input.password);
        if !user.password.verify(&raw, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = issue_pair(self.token_repo.as_ref(), &self.config, &user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User signed in");

        Ok(SessionOutput { user, tokens })
    }
}
