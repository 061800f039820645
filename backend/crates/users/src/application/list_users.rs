//! List Users Use Case

use std::sync::Arc;

use table_query::{ListRequest, PaginatedResult, paginate};

use crate::domain::{UserListRepository, UserSummary};
use crate::error::UserAdminResult;

pub struct ListUsersUseCase<L>
where
    L: UserListRepository,
{
    repo: Arc<L>,
}

impl<L> ListUsersUseCase<L>
where
    L: UserListRepository,
{
    pub fn new(repo: Arc<L>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, request: &ListRequest) -> UserAdminResult<PaginatedResult<UserSummary>> {
        let (rows, total) = self.repo.list(request).await?;

        tracing::debug!(
            page = request.pagination.page,
            limit = request.pagination.limit,
            filters = request.filters.len(),
            total,
            "Listed users"
        );

        Ok(paginate(rows, total, request.pagination))
    }
}
