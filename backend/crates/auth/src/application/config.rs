//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;
use platform::crypto::random_bytes;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 signing key
    pub jwt_secret: Vec<u8>,
    /// 15 minutes
    pub access_token_ttl: Duration,
    /// 30 days
    pub refresh_token_ttl: Duration,
    /// 1 hour
    pub reset_token_ttl: Duration,
    /// Base URL of the web client, used in password reset links
    pub client_url: String,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: vec![0u8; 32],
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(30),
            reset_token_ttl: Duration::hours(1),
            client_url: "http://localhost:5173".to_string(),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>, client_url: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            client_url: client_url.into(),
            ..Default::default()
        }
    }

    /// Random signing key; tokens do not survive a restart
    pub fn development() -> Self {
        Self {
            jwt_secret: random_bytes(32),
            ..Default::default()
        }
    }

    pub fn with_pepper(mut self, pepper: Option<Vec<u8>>) -> Self {
        self.password_pepper = pepper.filter(|p| !p.is_empty());
        self
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn reset_link(&self, token: &str) -> String {
        format!(
            "{}/reset-password?token={}",
            self.client_url.trim_end_matches('/'),
            token
        )
    }
}
