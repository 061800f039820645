//! Query parameter errors
//!
//! The parser fails only on `page` / `limit`; sort and filter keys are
//! never rejected.

use kernel::error::app_error::AppError;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryParamError {
    #[error("{field} must be an integer (got {value:?})")]
    NotAnInteger { field: &'static str, value: String },

    #[error("page must be at least 1 (got {0})")]
    PageTooSmall(i64),

    #[error("limit must be between 1 and {max} (got {actual})")]
    LimitOutOfRange { actual: i64, max: u32 },
}

impl QueryParamError {
    /// Name of the offending query parameter
    pub fn field(&self) -> &'static str {
        match self {
            QueryParamError::NotAnInteger { field, .. } => field,
            QueryParamError::PageTooSmall(_) => "page",
            QueryParamError::LimitOutOfRange { .. } => "limit",
        }
    }
}

impl From<QueryParamError> for AppError {
    fn from(err: QueryParamError) -> Self {
        tracing::debug!(field = err.field(), error = %err, "Rejected list query parameters");
        let mut details = Map::new();
        details.insert(
            err.field().to_string(),
            Value::Array(vec![Value::String(err.to_string())]),
        );
        AppError::validation("Invalid query parameters", Value::Object(details))
    }
}
