//! Issued Token Entity
//!
//! Every token handed to a client is recorded by its SHA-256 digest. A JWT
//! that verifies cryptographically is still refused unless its record exists,
//! is unrevoked, unexpired and of the expected type; this table is the
//! revocation list.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{IssuedTokenId, UserId};
use platform::crypto::token_digest;

use crate::domain::value_object::token_type::TokenType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub id: IssuedTokenId,
    pub user_id: UserId,
    /// SHA-256 of the token string
    pub token_hash: Vec<u8>,
    pub token_type: TokenType,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub revoked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl IssuedToken {
    pub fn issue(
        user_id: UserId,
        token: &str,
        token_type: TokenType,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: IssuedTokenId::new(),
            user_id,
            token_hash: token_digest(token),
            token_type,
            expires_at: issued_at + ttl,
            revoked: false,
            revoked_at: None,
            created_at: issued_at,
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Unrevoked, unexpired and of the expected type
    pub fn is_usable_as(&self, expected: TokenType, now: DateTime<Utc>) -> bool {
        !self.revoked && !self.is_expired(now) && self.token_type == expected
    }

    pub fn revoke(&mut self, now: DateTime<Utc>) {
        if !self.revoked {
            self.revoked = true;
            self.revoked_at = Some(now);
        }
    }
}
