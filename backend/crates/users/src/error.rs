//! Users Error Types

use auth::AuthError;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type UserAdminResult<T> = Result<T, UserAdminError>;

#[derive(Debug, Error)]
pub enum UserAdminError {
    #[error("User not found")]
    NotFound,

    #[error("Cannot delete your own account")]
    CannotDeleteOwnAccount,

    /// Validation, duplicate email and storage errors from the account layer
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UserAdminError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserAdminError::NotFound => ErrorKind::NotFound,
            UserAdminError::CannotDeleteOwnAccount => ErrorKind::BadRequest,
            UserAdminError::Auth(e) => e.kind(),
            UserAdminError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    fn log(&self) {
        match self {
            UserAdminError::Database(e) => {
                tracing::error!(error = %e, "Users database error");
            }
            UserAdminError::Auth(e) => e.log(),
            _ => {
                tracing::debug!(error = %self, "Users error");
            }
        }
    }
}

impl From<UserAdminError> for AppError {
    fn from(err: UserAdminError) -> Self {
        match err {
            UserAdminError::NotFound => {
                AppError::not_found("User not found").with_code("USER_NOT_FOUND")
            }
            UserAdminError::CannotDeleteOwnAccount => {
                AppError::bad_request("Cannot delete your own account")
                    .with_code("CANNOT_DELETE_OWN_ACCOUNT")
            }
            UserAdminError::Auth(AuthError::UserNotFound) => {
                AppError::not_found("User not found").with_code("USER_NOT_FOUND")
            }
            UserAdminError::Auth(e) => AppError::from(e),
            UserAdminError::Database(e) => AppError::internal("Database error").with_source(e),
        }
    }
}

impl IntoResponse for UserAdminError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
