//! Course value objects

use derive_more::Display;
use serde::{Deserialize, Serialize};

use auth::models::FieldError;

pub const COURSE_TITLE_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseTitle(String);

impl CourseTitle {
    pub fn new(title: &str) -> Result<Self, FieldError> {
        let title = title.trim();

        if title.is_empty() {
            return Err(FieldError::new("title", "Title is required"));
        }
        if title.chars().count() > COURSE_TITLE_MAX_LENGTH {
            return Err(FieldError::new(
                "title",
                format!("Title must be at most {COURSE_TITLE_MAX_LENGTH} characters"),
            ));
        }

        Ok(Self(title.to_string()))
    }

    pub fn from_db(title: String) -> Self {
        Self(title)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseLevel {
    #[default]
    #[display("beginner")]
    Beginner,
    #[display("intermediate")]
    Intermediate,
    #[display("advanced")]
    Advanced,
}

impl CourseLevel {
    pub const fn code(&self) -> &'static str {
        match self {
            CourseLevel::Beginner => "beginner",
            CourseLevel::Intermediate => "intermediate",
            CourseLevel::Advanced => "advanced",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "beginner" => Some(CourseLevel::Beginner),
            "intermediate" => Some(CourseLevel::Intermediate),
            "advanced" => Some(CourseLevel::Advanced),
            _ => None,
        }
    }

    pub fn parse(code: &str) -> Result<Self, FieldError> {
        Self::from_code(code.trim()).ok_or_else(|| {
            FieldError::new("level", "Level must be one of: beginner, intermediate, advanced")
        })
    }
}

/// Price in the smallest currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceCents(i64);

impl PriceCents {
    pub fn new(cents: i64) -> Result<Self, FieldError> {
        if cents < 0 {
            return Err(FieldError::new("priceCents", "Price must not be negative"));
        }
        Ok(Self(cents))
    }

    pub fn from_db(cents: i64) -> Self {
        Self(cents)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}
