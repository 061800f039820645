//! Delete User Use Case

use std::sync::Arc;

use auth::store::UserRepository;
use kernel::id::UserId;

use crate::application::parse_user_id;
use crate::error::{UserAdminError, UserAdminResult};

pub struct DeleteUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> DeleteUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// `actor` is the admin making the request; admins cannot delete themselves.
    pub async fn execute(&self, actor: UserId, id: &str) -> UserAdminResult<()> {
        let id = parse_user_id(id)?;
        if id == actor {
            return Err(UserAdminError::CannotDeleteOwnAccount);
        }

        if !self.user_repo.delete(&id).await? {
            return Err(UserAdminError::NotFound);
        }

        tracing::info!(user_id = %id, deleted_by = %actor, "User deleted by admin");

        Ok(())
    }
}
