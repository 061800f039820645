//! Sign Up Use Case
//!
//! Registers a student account and signs it in.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::tokens::{TokenPair, issue_pair};
use crate::domain::entity::user::User;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::{
    FieldErrors, display_name::DisplayName, email::Email, user_password::RawPassword,
    user_password::UserPassword, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// A signed-in user and the tokens just issued for them
#[derive(Debug)]
pub struct SessionOutput {
    pub user: User,
    pub tokens: TokenPair,
}

pub struct SignUpUseCase<U, T>
where
    U: UserRepository,
    T: TokenRepository,
{
    user_repo: Arc<U>,
    token_repo: Arc<T>,
    config: Arc<AuthConfig>,
}

impl<U, T> SignUpUseCase<U, T>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SessionOutput> {
        let mut errors = FieldErrors::new();
        let email = errors.check(Email::new(&input.email));
        let password = errors.check(RawPassword::new(input.password));
        let name = errors.check(DisplayName::new(&input.name));

        let (Some(email), Some(password), Some(name)) = (email, password, name) else {
            return Err(AuthError::InvalidInput(errors.into_vec()));
        };

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password = UserPassword::from_raw(&password, self.config.pepper())?;
        let user = User::new(email, name, password, UserRole::Student);
        self.user_repo.create(&user).await?;

        let tokens = issue_pair(self.token_repo.as_ref(), &self.config, &user).await?;

        tracing::info!(user_id = %user.id, "User signed up");

        Ok(SessionOutput { user, tokens })
    }
}
