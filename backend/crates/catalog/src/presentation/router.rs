//! Catalog Routers

use axum::{Router, routing::get};
use std::sync::Arc;

use auth::middleware::admin_only;
use auth::store::{TokenRepository, UserRepository};
use auth::{AuthConfig, PgAuthRepository};

use crate::domain::CourseRepository;
use crate::infra::PgCourseRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Public catalog, mounted at `/courses`
pub fn courses_router(repo: PgCourseRepository) -> Router {
    courses_router_generic(Arc::new(repo))
}

pub fn courses_router_generic<C>(repo: Arc<C>) -> Router
where
    C: CourseRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(handlers::list_published::<C>))
        .route("/{id}", get(handlers::get_published::<C>))
        .with_state(CatalogAppState { repo })
}

/// Course management, mounted at `/admin/courses`
pub fn admin_courses_router(
    repo: PgCourseRepository,
    auth_repo: PgAuthRepository,
    config: Arc<AuthConfig>,
) -> Router {
    admin_courses_router_generic(Arc::new(repo), Arc::new(auth_repo), config)
}

pub fn admin_courses_router_generic<C, A>(
    repo: Arc<C>,
    auth_repo: Arc<A>,
    config: Arc<AuthConfig>,
) -> Router
where
    C: CourseRepository + Clone + Send + Sync + 'static,
    A: UserRepository + TokenRepository + Clone + Send + Sync + 'static,
{
    let router = Router::new()
        .route(
            "/",
            get(handlers::list_all::<C>).post(handlers::create_course::<C>),
        )
        .route(
            "/{id}",
            get(handlers::get_any::<C>)
                .patch(handlers::update_course::<C>)
                .delete(handlers::delete_course::<C>),
        )
        .with_state(CatalogAppState { repo });

    admin_only(router, auth_repo, config)
}
