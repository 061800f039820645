//! In-memory repository
//!
//! Same contract as [`PgAuthRepository`](super::postgres::PgAuthRepository),
//! backed by maps. Used by tests and by local runs without a database.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use kernel::id::{IssuedTokenId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::{issued_token::IssuedToken, user::User};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
    tokens: Arc<RwLock<HashMap<IssuedTokenId, IssuedToken>>>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored user, in no particular order
    pub async fn users(&self) -> Vec<User> {
        self.users.read().await.values().cloned().collect()
    }

    /// Every stored token record, in no particular order
    pub async fn tokens(&self) -> Vec<IssuedToken> {
        self.tokens.read().await.values().cloned().collect()
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.read().await.values().any(|u| &u.email == email))
    }

    async fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|u| u.email == user.email && u.id != user.id)
        {
            return Err(AuthError::EmailAlreadyExists);
        }
        if let Some(stored) = users.get_mut(&user.id) {
            *stored = user.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: &UserId) -> AuthResult<bool> {
        let removed = self.users.write().await.remove(id).is_some();
        if removed {
            self.tokens.write().await.retain(|_, t| &t.user_id != id);
        }
        Ok(removed)
    }
}

impl TokenRepository for InMemoryAuthRepository {
    async fn create(&self, token: &IssuedToken) -> AuthResult<()> {
        self.tokens.write().await.insert(token.id, token.clone());
        Ok(())
    }

    async fn find_by_hash(&self, token_hash: &[u8]) -> AuthResult<Option<IssuedToken>> {
        Ok(self
            .tokens
            .read()
            .await
            .values()
            .find(|t| t.token_hash == token_hash)
            .cloned())
    }

    async fn revoke(&self, id: &IssuedTokenId) -> AuthResult<bool> {
        match self.tokens.write().await.get_mut(id) {
            Some(token) if !token.revoked => {
                token.revoke(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> AuthResult<u64> {
        let now = Utc::now();
        let mut revoked = 0;
        for token in self.tokens.write().await.values_mut() {
            if &token.user_id == user_id && !token.revoked {
                token.revoke(now);
                revoked += 1;
            }
        }
        Ok(revoked)
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now = Utc::now();
        let mut tokens = self.tokens.write().await;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired(now));
        Ok((before - tokens.len()) as u64)
    }
}
