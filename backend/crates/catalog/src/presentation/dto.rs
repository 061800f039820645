//! API DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Course;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub level: String,
    pub price_cents: i64,
    pub published: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub price_cents: Option<i64>,
    pub published: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: String,
    pub price_cents: i64,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseResponse {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.to_string(),
            title: course.title.as_str().to_string(),
            description: course.description,
            level: course.level.code().to_string(),
            price_cents: course.price_cents.get(),
            published: course.published,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

/// `{ "course": ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseEnvelope {
    pub course: CourseResponse,
}

impl From<Course> for CourseEnvelope {
    fn from(course: Course) -> Self {
        Self {
            course: course.into(),
        }
    }
}
