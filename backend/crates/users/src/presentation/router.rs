//! Users Router
//!
//! Every route requires an authenticated admin.

use axum::{Router, routing::get};
use std::sync::Arc;

use auth::middleware::admin_only;
use auth::store::{TokenRepository, UserRepository};
use auth::{AuthConfig, PgAuthRepository};

use crate::domain::UserListRepository;
use crate::presentation::handlers::{self, UsersAppState};

/// Create the admin users router with PostgreSQL repository
pub fn users_router(repo: PgAuthRepository, config: Arc<AuthConfig>) -> Router {
    users_router_generic(Arc::new(repo), config)
}

/// Create a generic admin users router for any repository implementation
pub fn users_router_generic<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + TokenRepository + UserListRepository + Clone + Send + Sync + 'static,
{
    let state = UsersAppState {
        repo: repo.clone(),
        config: config.clone(),
    };

    let router = Router::new()
        .route(
            "/",
            get(handlers::list_users::<R>).post(handlers::create_user::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_user::<R>)
                .patch(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .with_state(state);

    admin_only(router, repo, config)
}
