//! Repository Traits

use table_query::ListRequest;

use crate::domain::summary::UserSummary;
use crate::error::UserAdminResult;

/// One page of users plus the filtered total.
#[trait_variant::make(UserListRepository: Send)]
pub trait LocalUserListRepository {
    async fn list(&self, request: &ListRequest) -> UserAdminResult<(Vec<UserSummary>, u64)>;
}
