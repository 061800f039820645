//! Token issuing and verification shared by the use cases

use chrono::{Duration, Utc};
use platform::crypto::token_digest;
use serde::Serialize;

use crate::application::config::AuthConfig;
use crate::domain::claims::Claims;
use crate::domain::entity::{issued_token::IssuedToken, user::User};
use crate::domain::repository::TokenRepository;
use crate::domain::value_object::token_type::TokenType;
use crate::error::AuthResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Sign a JWT for the user and record its digest.
pub(crate) async fn issue_jwt<T>(
    repo: &T,
    config: &AuthConfig,
    user: &User,
    typ: TokenType,
    ttl: Duration,
) -> AuthResult<String>
where
    T: TokenRepository,
{
    let now = Utc::now();
    let token = Claims::new(user.id, user.role, typ, now, ttl).encode(&config.jwt_secret)?;
    repo.create(&IssuedToken::issue(user.id, &token, typ, now, ttl))
        .await?;
    Ok(token)
}

pub(crate) async fn issue_pair<T>(repo: &T, config: &AuthConfig, user: &User) -> AuthResult<TokenPair>
where
    T: TokenRepository,
{
    Ok(TokenPair {
        access_token: issue_jwt(repo, config, user, TokenType::Access, config.access_token_ttl)
            .await?,
        refresh_token: issue_jwt(
            repo,
            config,
            user,
            TokenType::Refresh,
            config.refresh_token_ttl,
        )
        .await?,
    })
}

/// Signature, expiry, `typ` claim, then the stored record.
///
/// `Ok(None)` for any token that must be refused; callers pick the error.
pub(crate) async fn verify_jwt<T>(
    repo: &T,
    config: &AuthConfig,
    token: &str,
    expected: TokenType,
) -> AuthResult<Option<(Claims, IssuedToken)>>
where
    T: TokenRepository,
{
    let claims = match Claims::decode(token, &config.jwt_secret) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!(error = %e, "Token rejected");
            return Ok(None);
        }
    };
    if claims.typ != expected {
        tracing::debug!(expected = %expected, actual = %claims.typ, "Token type mismatch");
        return Ok(None);
    }

    let record = repo.find_by_hash(&token_digest(token)).await?;
    Ok(record
        .filter(|r| r.is_usable_as(expected, Utc::now()) && r.user_id == claims.user_id())
        .map(|r| (claims, r)))
}
