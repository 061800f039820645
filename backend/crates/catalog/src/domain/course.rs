//! Course Entity

use chrono::{DateTime, Utc};
use kernel::id::CourseId;
use table_query::memory::{FieldValue, Record};

use crate::domain::value_object::{CourseLevel, CourseTitle, PriceCents};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: CourseId,
    pub title: CourseTitle,
    pub description: String,
    pub level: CourseLevel,
    pub price_cents: PriceCents,
    /// Drafts are visible to admins only
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    pub fn new(
        title: CourseTitle,
        description: String,
        level: CourseLevel,
        price_cents: PriceCents,
        published: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CourseId::new(),
            title,
            description,
            level,
            price_cents,
            published,
            created_at: now,
            updated_at: now,
        }
    }

    /// Record a modification
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Record for Course {
    fn field(&self, column_id: &str) -> Option<FieldValue<'_>> {
        Some(match column_id {
            "id" => FieldValue::text(self.id.to_string()),
            "title" => FieldValue::text(self.title.as_str()),
            "description" => FieldValue::text(self.description.as_str()),
            "level" => FieldValue::text(self.level.code()),
            "published" => FieldValue::Bool(self.published),
            "createdAt" => FieldValue::Timestamp(self.created_at),
            _ => return None,
        })
    }
}
