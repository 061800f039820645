//! List row for the admin console

use auth::models::{User, UserRole};
use chrono::{DateTime, Utc};
use kernel::id::UserId;
use table_query::memory::{FieldValue, Record};

/// A user without credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            name: user.name.as_str().to_string(),
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl Record for UserSummary {
    fn field(&self, column_id: &str) -> Option<FieldValue<'_>> {
        Some(match column_id {
            "id" => FieldValue::text(self.id.to_string()),
            "email" => FieldValue::text(self.email.as_str()),
            "name" => FieldValue::text(self.name.as_str()),
            "role" => FieldValue::text(self.role.code()),
            "createdAt" => FieldValue::Timestamp(self.created_at),
            "updatedAt" => FieldValue::Timestamp(self.updated_at),
            _ => return None,
        })
    }
}
