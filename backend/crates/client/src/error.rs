//! Client Error Types

use serde::Deserialize;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// An error response decoded from the problem body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
}

impl ApiError {
    /// Build from a status and raw body; non-JSON bodies keep the status text.
    pub fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct Problem {
            code: Option<String>,
            detail: Option<String>,
            title: Option<String>,
            message: Option<String>,
        }

        match serde_json::from_str::<Problem>(body) {
            Ok(problem) => Self {
                status,
                code: problem.code,
                message: problem
                    .detail
                    .or(problem.message)
                    .or(problem.title)
                    .unwrap_or_else(|| default_message(status)),
            },
            Err(_) => Self {
                status,
                code: None,
                message: default_message(status),
            },
        }
    }
}

fn default_message(status: u16) -> String {
    format!("Request failed with status {status}")
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{} ({})", .0.message, .0.status)]
    Api(ApiError),

    /// Refresh failed or no refresh token was available; tokens were cleared
    #[error("Session expired")]
    SessionExpired,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(e) => Some(e.status),
            ClientError::SessionExpired => Some(401),
            _ => None,
        }
    }

    /// Server error code, e.g. `EMAIL_ALREADY_EXISTS`
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::Api(e) => e.code.as_deref(),
            _ => None,
        }
    }
}

/// Why a shared refresh failed. Cloned to every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshFailure {
    #[error("No refresh token")]
    MissingRefreshToken,

    #[error("Refresh rejected with status {status}")]
    Rejected { status: u16, code: Option<String> },

    #[error("Refresh transport error: {0}")]
    Transport(String),

    /// The refreshing task was dropped before finishing
    #[error("Refresh interrupted")]
    Interrupted,
}
