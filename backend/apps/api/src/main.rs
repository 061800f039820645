//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod rate_limit;

use auth::PgAuthRepository;
use auth::store::TokenRepository;
use axum::middleware::from_fn_with_state;
use axum::{
    Router, http,
    http::{Method, header},
};
use catalog::PgCourseRepository;
use config::ServerConfig;
use platform::mail::AnyMailer;
use platform::rate_limit::{InMemoryRateLimitStore, RateLimitStore};
use rate_limit::{RateLimitState, rate_limit};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kernel::error::app_error::AppError;

/// Feature routers before they are mounted
struct Routes {
    auth: Router,
    users: Router,
    courses: Router,
    admin_courses: Router,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,users=info,catalog=info,table_query=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Startup cleanup: drop expired token records
    // Errors here should not prevent server startup
    let auth_store = PgAuthRepository::new(pool.clone());
    match auth_store.cleanup_expired().await {
        Ok(deleted) => {
            tracing::info!(tokens_deleted = deleted, "Expired token cleanup completed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Expired token cleanup failed, continuing anyway");
        }
    }

    if config.resend_api_key.is_none() {
        tracing::warn!("RESEND_API_KEY not set, outgoing mail will only be logged");
    }
    let mailer = AnyMailer::from_api_key(config.resend_api_key.clone(), config.mail_from.clone());
    let auth_config = Arc::new(config.auth.clone());
    let course_store = PgCourseRepository::new(pool.clone());

    let routes = Routes {
        auth: auth::auth_router(auth_store.clone(), mailer, auth_config.clone()),
        users: users::users_router(auth_store.clone(), auth_config.clone()),
        courses: catalog::courses_router(course_store.clone()),
        admin_courses: catalog::admin_courses_router(course_store, auth_store, auth_config),
    };

    let limiter = RateLimitState {
        store: Arc::new(InMemoryRateLimitStore::new()),
        config: config.rate_limit.clone(),
    };

    let app = build_app(routes, &config.frontend_origins, limiter);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn build_app<S>(routes: Routes, frontend_origins: &[String], limiter: RateLimitState<S>) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    Router::new()
        .nest("/auth", routes.auth)
        .nest("/admin/users", routes.users)
        .nest("/courses", routes.courses)
        .nest("/admin/courses", routes.admin_courses)
        .fallback(|| async { AppError::not_found("Route not found") })
        .layer(from_fn_with_state(limiter, rate_limit::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
