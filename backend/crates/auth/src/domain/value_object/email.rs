//! Email Value Object
//!
//! Lower-cased, trimmed and shape-checked. Deliverability is not verified.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::FieldError;

/// RFC 5321 path limit
const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(email: &str) -> Result<Self, FieldError> {
        let email = email.trim().to_lowercase();

        if email.is_empty() {
            return Err(FieldError::new("email", "Email is required"));
        }
        if email.len() > EMAIL_MAX_LENGTH {
            return Err(FieldError::new(
                "email",
                format!("Email must be at most {EMAIL_MAX_LENGTH} characters"),
            ));
        }
        if !is_valid_format(&email) {
            return Err(FieldError::new("email", "Invalid email address"));
        }

        Ok(Self(email))
    }

    /// Trusted value read back from storage
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

fn is_valid_format(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
        return false;
    }
    if domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return false;
    }
    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    !(domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) || domain.contains(".."))
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
