//! Auth Router

use axum::{Router, routing::post};
use platform::mail::{AnyMailer, Mailer};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{TokenRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, mailer: AnyMailer, config: Arc<AuthConfig>) -> Router {
    auth_router_generic(Arc::new(repo), Arc::new(mailer), config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R, M>(repo: Arc<R>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo,
        mailer,
        config,
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R, M>))
        .route("/login", post(handlers::login::<R, M>))
        .route("/refresh", post(handlers::refresh::<R, M>))
        .route("/logout", post(handlers::logout::<R, M>))
        .route("/forgot-password", post(handlers::forgot_password::<R, M>))
        .route("/reset-password", post(handlers::reset_password::<R, M>))
        .with_state(state)
}
