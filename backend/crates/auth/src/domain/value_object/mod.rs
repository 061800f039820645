//! Value Object Module

pub mod display_name;
pub mod email;
pub mod token_type;
pub mod user_password;
pub mod user_role;

use serde_json::{Map, Value};

/// A rejected input field and the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Collect field errors into `{field: [message, ...]}`.
pub fn field_details(errors: &[FieldError]) -> Value {
    let mut map = Map::new();
    for error in errors {
        let entry = map
            .entry(error.field)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(messages) = entry {
            messages.push(Value::String(error.message.clone()));
        }
    }
    Value::Object(map)
}

/// Accumulates per-field validation results so every problem is reported at once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the value on success, remember the error otherwise.
    pub fn check<T>(&mut self, result: Result<T, FieldError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.0.push(error);
                None
            }
        }
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}
