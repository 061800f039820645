//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, header};
use kernel::extract::ApiJson;
use platform::mail::Mailer;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    ForgotPasswordUseCase, RefreshUseCase, ResetPasswordInput, ResetPasswordUseCase, SignInInput,
    SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase, TokenPair,
};
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    ForgotPasswordRequest, LoginRequest, MessageResponse, RefreshRequest, ResetPasswordRequest,
    SessionResponse, SignUpRequest,
};

/// Same reply whether or not the account exists
pub const FORGOT_PASSWORD_MESSAGE: &str = "If the email exists, a reset link has been sent";

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub config: Arc<AuthConfig>,
}

/// POST /auth/signup
pub async fn sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> AuthResult<Json<SessionResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    Ok(Json(output.into()))
}

/// POST /auth/login
pub async fn login<R, M>(
    State(state): State<AuthAppState<R, M>>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> AuthResult<Json<SessionResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(output.into()))
}

/// POST /auth/refresh
pub async fn refresh<R, M>(
    State(state): State<AuthAppState<R, M>>,
    ApiJson(req): ApiJson<RefreshRequest>,
) -> AuthResult<Json<TokenPair>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = RefreshUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let tokens = use_case.execute(req.refresh_token.as_deref()).await?;

    Ok(Json(tokens))
}

/// POST /auth/logout
///
/// The body is optional; when present it may name a refresh token to revoke.
pub async fn logout<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
    body: Bytes,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let access_token = bearer_token(&headers).ok_or(AuthError::TokenRequired)?;

    let req: RefreshRequest = if body.iter().all(u8::is_ascii_whitespace) {
        RefreshRequest::default()
    } else {
        serde_json::from_slice(&body).unwrap_or_default()
    };

    let use_case = SignOutUseCase::new(state.repo.clone());
    use_case
        .execute(access_token, req.refresh_token.as_deref())
        .await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// POST /auth/forgot-password
pub async fn forgot_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    ApiJson(req): ApiJson<ForgotPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = ForgotPasswordUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    use_case.execute(&req.email).await?;

    Ok(Json(MessageResponse::new(FORGOT_PASSWORD_MESSAGE)))
}

/// POST /auth/reset-password
pub async fn reset_password<R, M>(
    State(state): State<AuthAppState<R, M>>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case =
        ResetPasswordUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    use_case
        .execute(ResetPasswordInput {
            token: req.token,
            password: req.password,
        })
        .await?;

    Ok(Json(MessageResponse::new("Password reset successfully")))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Token from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
