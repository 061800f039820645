//! Token storage
//!
//! Claims are decoded without verifying the signature. They drive UI
//! decisions only; the server checks every request.

use std::sync::{Arc, PoisonError, RwLock};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub role: String,
    #[serde(default)]
    pub typ: Option<String>,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    pub fn is_expired_at(&self, unix_seconds: i64) -> bool {
        self.exp <= unix_seconds
    }
}

/// Payload of a three-part JWT, `None` for anything else.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut parts = token.split('.');
    let (Some(_), Some(payload), Some(_), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// Shared access/refresh pair. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Tokens>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&self, access_token: impl Into<String>, refresh_token: impl Into<String>) {
        let mut tokens = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        tokens.access = Some(access_token.into());
        tokens.refresh = Some(refresh_token.into());
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Tokens::default();
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .access
            .clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .refresh
            .clone()
    }

    pub fn claims(&self) -> Option<TokenClaims> {
        decode_claims(&self.access_token()?)
    }

    pub fn role(&self) -> Option<String> {
        self.claims().map(|c| c.role)
    }

    pub fn is_admin(&self) -> bool {
        self.claims().is_some_and(|c| c.is_admin())
    }
}
