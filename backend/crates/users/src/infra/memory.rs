//! In-memory listing over [`InMemoryAuthRepository`]

use auth::InMemoryAuthRepository;
use table_query::ListRequest;
use table_query::memory::evaluate;

use crate::domain::columns::USER_COLUMNS;
use crate::domain::{UserListRepository, UserSummary};
use crate::error::UserAdminResult;

impl UserListRepository for InMemoryAuthRepository {
    async fn list(&self, request: &ListRequest) -> UserAdminResult<(Vec<UserSummary>, u64)> {
        let rows: Vec<UserSummary> = self.users().await.iter().map(UserSummary::from).collect();
        Ok(evaluate(&rows, request, &USER_COLUMNS, None))
    }
}
