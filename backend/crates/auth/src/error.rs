//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. Each variant carries the stable `code`
//! clients switch on.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::{FieldError, field_details};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// One or more request fields failed validation
    #[error("Invalid input")]
    InvalidInput(Vec<FieldError>),

    #[error("Email already exists")]
    EmailAlreadyExists,

    /// Unknown email or wrong password; deliberately indistinguishable
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Refresh token is required")]
    RefreshTokenRequired,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// Logout without a bearer token
    #[error("No token provided")]
    TokenRequired,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("You don't have permission to access this resource")]
    Forbidden,

    #[error("User not found")]
    UserNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn invalid_field(error: FieldError) -> Self {
        AuthError::InvalidInput(vec![error])
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidInput(_)
            | AuthError::EmailAlreadyExists
            | AuthError::InvalidCredentials
            | AuthError::RefreshTokenRequired
            | AuthError::InvalidRefreshToken
            | AuthError::InvalidResetToken
            | AuthError::TokenRequired => ErrorKind::BadRequest,
            AuthError::Unauthenticated => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidInput(_) => "INVALID_INPUT",
            AuthError::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::RefreshTokenRequired => "REFRESH_TOKEN_REQUIRED",
            AuthError::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            AuthError::InvalidResetToken => "INVALID_RESET_TOKEN",
            AuthError::TokenRequired => "TOKEN_REQUIRED",
            AuthError::Unauthenticated => "UNAUTHORIZED",
            AuthError::Forbidden => "FORBIDDEN",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::Database(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidRefreshToken | AuthError::InvalidResetToken => {
                tracing::warn!(error = %self, "Rejected token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let code = err.code();
        match err {
            AuthError::InvalidInput(fields) => {
                AppError::validation("Invalid input", field_details(&fields))
            }
            AuthError::Database(e) => AppError::internal("Database error").with_source(e),
            other => AppError::new(other.kind(), other.to_string()).with_code(code),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<platform::password::PasswordHashError> for AuthError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<crate::domain::claims::JwtError> for AuthError {
    fn from(err: crate::domain::claims::JwtError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_statuses() {
        let cases = [
            (AuthError::EmailAlreadyExists, 400, "EMAIL_ALREADY_EXISTS"),
            (AuthError::InvalidCredentials, 400, "INVALID_CREDENTIALS"),
            (AuthError::RefreshTokenRequired, 400, "REFRESH_TOKEN_REQUIRED"),
            (AuthError::InvalidRefreshToken, 400, "INVALID_REFRESH_TOKEN"),
            (AuthError::InvalidResetToken, 400, "INVALID_RESET_TOKEN"),
            (AuthError::Unauthenticated, 401, "UNAUTHORIZED"),
            (AuthError::Forbidden, 403, "FORBIDDEN"),
            (AuthError::UserNotFound, 404, "USER_NOT_FOUND"),
            (AuthError::Internal("x".into()), 500, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            let app = AppError::from(err);
            assert_eq!(app.status_code(), status);
            assert_eq!(app.code(), code);
        }
    }

    #[test]
    fn test_invalid_input_carries_details() {
        let app = AppError::from(AuthError::InvalidInput(vec![FieldError::new(
            "email",
            "Invalid email address",
        )]));
        assert_eq!(app.code(), "INVALID_INPUT");
        assert_eq!(app.details().unwrap()["email"][0], "Invalid email address");
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let body = AppError::from(AuthError::Internal("pool exhausted".into())).problem_body();
        assert!(!body.to_string().contains("pool exhausted"));
    }
}
