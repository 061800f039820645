//! Get User Use Case

use std::sync::Arc;

use auth::store::UserRepository;

use crate::application::parse_user_id;
use crate::domain::UserSummary;
use crate::error::{UserAdminError, UserAdminResult};

pub struct GetUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> GetUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, id: &str) -> UserAdminResult<UserSummary> {
        let id = parse_user_id(id)?;
        let user = self
            .user_repo
            .find_by_id(&id)
            .await?
            .ok_or(UserAdminError::NotFound)?;
        Ok(UserSummary::from(&user))
    }
}
