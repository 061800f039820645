//! Application Layer
//!
//! Admin use cases over user accounts.

pub mod create_user;
pub mod delete_user;
pub mod get_user;
pub mod list_users;
pub mod update_user;

pub use create_user::{CreateUserInput, CreateUserUseCase};
pub use delete_user::DeleteUserUseCase;
pub use get_user::GetUserUseCase;
pub use list_users::ListUsersUseCase;
pub use update_user::{UpdateUserInput, UpdateUserUseCase};

use kernel::id::UserId;

use crate::error::{UserAdminError, UserAdminResult};

/// A path id that is not a UUID names no user.
pub(crate) fn parse_user_id(raw: &str) -> UserAdminResult<UserId> {
    UserId::parse(raw.trim()).map_err(|_| UserAdminError::NotFound)
}
