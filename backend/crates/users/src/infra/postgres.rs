//! PostgreSQL listing

use auth::models::UserRole;
use auth::{AuthError, PgAuthRepository};
use chrono::{DateTime, Utc};
use kernel::id::UserId;
use table_query::{ListPlan, ListRequest};
use uuid::Uuid;

use crate::domain::columns::USER_COLUMNS;
use crate::domain::{UserListRepository, UserSummary};
use crate::error::UserAdminResult;

const SELECT_SUMMARY: &str = "SELECT id, email, name, role, created_at, updated_at FROM users";

impl UserListRepository for PgAuthRepository {
    async fn list(&self, request: &ListRequest) -> UserAdminResult<(Vec<UserSummary>, u64)> {
        let plan = ListPlan::new(request, &USER_COLUMNS);

        // Count and page are two reads; under concurrent writes they may disagree
        let mut count = plan.count_query("FROM users");
        let total: i64 = count.build_query_scalar().fetch_one(self.pool()).await?;

        let mut page = plan.page_query(SELECT_SUMMARY);
        let rows = page
            .build_query_as::<UserSummaryRow>()
            .fetch_all(self.pool())
            .await?;

        let rows = rows
            .into_iter()
            .map(UserSummaryRow::into_summary)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rows, u64::try_from(total).unwrap_or(0)))
    }
}

#[derive(sqlx::FromRow)]
struct UserSummaryRow {
    id: Uuid,
    email: String,
    name: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserSummaryRow {
    fn into_summary(self) -> Result<UserSummary, AuthError> {
        let role = UserRole::from_code(&self.role)
            .ok_or_else(|| AuthError::Internal(format!("Invalid role in database: {}", self.role)))?;

        Ok(UserSummary {
            id: UserId::from_uuid(self.id),
            email: self.email,
            name: self.name,
            role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
