//! Catalog Error Types

use auth::models::{FieldError, field_details};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid input")]
    InvalidInput(Vec<FieldError>),

    #[error("Course not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidInput(_) => ErrorKind::BadRequest,
            CatalogError::NotFound => ErrorKind::NotFound,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::InvalidInput(_) => "INVALID_INPUT",
            CatalogError::NotFound => "COURSE_NOT_FOUND",
            CatalogError::Database(_) | CatalogError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(error = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, code = self.code(), "Catalog error");
            }
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidInput(fields) => {
                AppError::validation("Invalid input", field_details(&fields))
            }
            CatalogError::Database(e) => AppError::internal("Database error").with_source(e),
            other => AppError::new(other.kind(), other.to_string()).with_code(other.code()),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
