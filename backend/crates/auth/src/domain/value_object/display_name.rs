//! Display name shown in the admin console and mails

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FieldError;

pub const DISPLAY_NAME_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(name: &str) -> Result<Self, FieldError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(FieldError::new("name", "Name is required"));
        }
        if name.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(FieldError::new(
                "name",
                format!("Name must be at most {DISPLAY_NAME_MAX_LENGTH} characters"),
            ));
        }
        if name.chars().any(char::is_control) {
            return Err(FieldError::new("name", "Name contains invalid characters"));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
