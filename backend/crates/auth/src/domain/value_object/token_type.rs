use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Purpose of an issued token, stored with its record and in the `typ` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    #[display("access")]
    Access,
    #[display("refresh")]
    Refresh,
    #[display("password_reset")]
    PasswordReset,
}

impl TokenType {
    pub const fn code(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
            TokenType::PasswordReset => "password_reset",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "access" => Some(TokenType::Access),
            "refresh" => Some(TokenType::Refresh),
            "password_reset" => Some(TokenType::PasswordReset),
            _ => None,
        }
    }
}
