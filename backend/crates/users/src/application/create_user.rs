//! Create User Use Case
//!
//! Admins create accounts with any role; the password policy still applies.

use std::sync::Arc;

use auth::models::{DisplayName, Email, FieldErrors, RawPassword, User, UserPassword, UserRole};
use auth::store::UserRepository;
use auth::{AuthConfig, AuthError};

use crate::domain::UserSummary;
use crate::error::UserAdminResult;

pub struct CreateUserInput {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

pub struct CreateUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> CreateUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: CreateUserInput) -> UserAdminResult<UserSummary> {
        let mut errors = FieldErrors::new();
        let email = errors.check(Email::new(&input.email));
        let password = errors.check(RawPassword::new(input.password));
        let name = errors.check(DisplayName::new(&input.name));
        let role = errors.check(UserRole::parse(&input.role));

        let (Some(email), Some(password), Some(name), Some(role)) = (email, password, name, role)
        else {
            return Err(AuthError::InvalidInput(errors.into_vec()).into());
        };

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyExists.into());
        }

        let password =
            UserPassword::from_raw(&password, self.config.pepper()).map_err(AuthError::from)?;
        let user = User::new(email, name, password, role);
        self.user_repo.create(&user).await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User created by admin");

        Ok(UserSummary::from(&user))
    }
}
