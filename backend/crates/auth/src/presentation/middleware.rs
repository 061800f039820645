//! Auth Middleware
//!
//! `require_auth` resolves the bearer token into an [`AuthContext`];
//! `require_role` then checks the caller's *current* role against an
//! allow-list. Layer them with [`protect`].

use axum::Router;
use axum::extract::{Request, State};
use axum::middleware::{Next, from_fn_with_state};
use axum::response::Response;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{AuthContext, AuthenticateUseCase};
use crate::domain::entity::user::User;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;
use crate::presentation::handlers::bearer_token;

/// State for [`require_auth`]
#[derive(Clone)]
pub struct AuthGuardState<R>
where
    R: TokenRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

/// State for [`require_role`]
#[derive(Clone)]
pub struct RoleGuardState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub allowed: &'static [UserRole],
}

/// The caller's account as loaded by [`require_role`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// 401 unless the request carries a valid, unrevoked access token.
pub async fn require_auth<R>(
    State(state): State<AuthGuardState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: TokenRepository + Clone + Send + Sync + 'static,
{
    let token = bearer_token(req.headers()).ok_or(AuthError::Unauthenticated)?;

    let use_case = AuthenticateUseCase::new(state.repo.clone(), state.config.clone());
    let context = use_case.execute(token).await?;

    req.extensions_mut().insert(context);
    Ok(next.run(req).await)
}

/// 401 without [`AuthContext`], 404 if the account is gone, 403 if the role
/// is not allowed.
pub async fn require_role<R>(
    State(state): State<RoleGuardState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let user_id = req
        .extensions()
        .get::<AuthContext>()
        .map(|ctx| ctx.user_id)
        .ok_or(AuthError::Unauthenticated)?;

    let user = state
        .repo
        .find_by_id(&user_id)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    if !state.allowed.contains(&user.role) {
        tracing::warn!(user_id = %user.id, role = %user.role, "Role not allowed");
        return Err(AuthError::Forbidden);
    }

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// Put every route of `router` behind `require_auth` and `require_role`.
pub fn protect<S, R>(
    router: Router<S>,
    repo: Arc<R>,
    config: Arc<AuthConfig>,
    allowed: &'static [UserRole],
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let role_guard = RoleGuardState {
        repo: repo.clone(),
        allowed,
    };
    let auth_guard = AuthGuardState { repo, config };

    // The last layer added runs first
    router
        .route_layer(from_fn_with_state(role_guard, require_role::<R>))
        .route_layer(from_fn_with_state(auth_guard, require_auth::<R>))
}

/// Admin-only routes
pub fn admin_only<S, R>(router: Router<S>, repo: Arc<R>, config: Arc<AuthConfig>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    protect(router, repo, config, &[UserRole::Admin])
}
