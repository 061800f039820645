//! Update User Use Case
//!
//! Partial update: absent fields stay as they are. A new password revokes
//! every outstanding token of the user.

use std::sync::Arc;

use auth::models::{DisplayName, Email, FieldErrors, RawPassword, UserPassword, UserRole};
use auth::store::{TokenRepository, UserRepository};
use auth::{AuthConfig, AuthError};

use crate::application::parse_user_id;
use crate::domain::UserSummary;
use crate::error::{UserAdminError, UserAdminResult};

#[derive(Debug, Default)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub password: Option<String>,
}

pub struct UpdateUserUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> UpdateUserUseCase<U, T>
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

    pub async fn execute(&self, id: &str, input: UpdateUserInput) -> UserAdminResult<UserSummary> {
        let id = parse_user_id(id)?;

        let mut errors = FieldErrors::new();
        let email = input.email.map(|e| errors.check(Email::new(&e)));
        let name = input.name.map(|n| errors.check(DisplayName::new(&n)));
        let role = input.role.map(|r| errors.check(UserRole::parse(&r)));
        let password = input.password.map(|p| errors.check(RawPassword::new(p)));
        if !errors.is_empty() {
            return Err(AuthError::InvalidInput(errors.into_vec()).into());
        }

        let mut user = self
            .user_repo
            .find_by_id(&id)
            .await?
            .ok_or(UserAdminError::NotFound)?;

        if let Some(email) = email.flatten().filter(|e| e != &user.email) {
            if self.user_repo.exists_by_email(&email).await? {
                return Err(AuthError::EmailAlreadyExists.into());
            }
            user.change_email(email);
        }
        if let Some(name) = name.flatten() {
            user.rename(name);
        }
        if let Some(role) = role.flatten() {
            user.set_role(role);
        }
        let password_changed = match password.flatten() {
            Some(raw) => {
                let hashed =
                    UserPassword::from_raw(&raw, self.config.pepper()).map_err(AuthError::from)?;
                user.set_password(hashed);
                true
            }
            None => false,
        };

        self.user_repo.update(&user).await?;

        if password_changed {
            let revoked = self.token_repo.revoke_all_for_user(&user.id).await?;
            tracing::info!(user_id = %user.id, revoked_tokens = revoked, "Password changed by admin");
        }

        tracing::info!(user_id = %user.id, "User updated by admin");

        Ok(UserSummary::from(&user))
    }
}
