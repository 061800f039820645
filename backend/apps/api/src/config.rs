//! Server configuration read from the environment

use anyhow::{Context, bail};
use auth::AuthConfig;
use platform::rate_limit::RateLimitConfig;
use std::env;
use std::str::FromStr;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CLIENT_URL: &str = "http://localhost:5173";
const DEFAULT_MAIL_FROM: &str = "Courses <no-reply@localhost>";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub frontend_origins: Vec<String>,
    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let client_url = get("CLIENT_URL").unwrap_or_else(|| DEFAULT_CLIENT_URL.to_string());

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| client_url.clone())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        let auth = match get("JWT_SECRET") {
            Some(secret) => AuthConfig::new(secret.into_bytes(), client_url),
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random key; tokens will not survive a restart");
                AuthConfig {
                    client_url,
                    ..AuthConfig::development()
                }
            }
            None => bail!("JWT_SECRET must be set in release builds"),
        }
        .with_pepper(get("PASSWORD_PEPPER").map(String::into_bytes));

        let rate_limit = RateLimitConfig::new(
            parse_or(&get, "RATE_LIMIT_MAX_REQUESTS", RateLimitConfig::default().max_requests)?,
            parse_or(
                &get,
                "RATE_LIMIT_WINDOW_SECS",
                RateLimitConfig::default().window.as_secs(),
            )?,
        );
        if rate_limit.max_requests == 0 || rate_limit.window.is_zero() {
            bail!("RATE_LIMIT_MAX_REQUESTS and RATE_LIMIT_WINDOW_SECS must be positive");
        }

        Ok(Self {
            database_url,
            database_max_connections: parse_or(
                &get,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            port: parse_or(&get, "PORT", DEFAULT_PORT)?,
            frontend_origins,
            resend_api_key: get("RESEND_API_KEY"),
            mail_from: get("MAIL_FROM").unwrap_or_else(|| DEFAULT_MAIL_FROM.to_string()),
            auth,
            rate_limit,
        })
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} is not a valid number: {raw:?}")),
        None => Ok(default),
    }
}
