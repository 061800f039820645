//! User Password Value Object
//!
//! Domain wrapper over `platform::password`: [`RawPassword`] is what the
//! user typed, [`UserPassword`] is the Argon2id hash that gets stored.

use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

use super::FieldError;

/// Password from user input, zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// A new password; the policy applies (8..=128 chars, no weak patterns).
    pub fn new(raw: String) -> Result<Self, FieldError> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(|e| FieldError::new("password", policy_message(&e)))
    }

    /// A login or confirmation attempt; only normalized.
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

fn policy_message(error: &PasswordPolicyError) -> String {
    match error {
        PasswordPolicyError::EmptyOrWhitespace => "Password is required".to_string(),
        other => other.to_string(),
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

/// Argon2id hash in PHC format, as stored in `users.password_hash`.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> Result<Self, PasswordHashError> {
        raw.inner().hash(pepper).map(Self)
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_phc_string(phc_string).map(Self)
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Constant-time check; `pepper` must match the one used for hashing.
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
