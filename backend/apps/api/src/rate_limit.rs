//! Per-client rate limiting middleware

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use platform::client::client_key;
use platform::rate_limit::{RateLimitConfig, RateLimitDecision, RateLimitStore};
use std::net::SocketAddr;
use std::sync::Arc;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

pub struct RateLimitState<S>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: RateLimitConfig,
}

// Manual impl: the store itself need not be Clone
impl<S> Clone for RateLimitState<S>
where
    S: RateLimitStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

pub async fn rate_limit<S>(
    State(state): State<RateLimitState<S>>,
    req: Request,
    next: Next,
) -> Response
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let key = client_key(req.headers(), peer);

    let decision = match state.store.check_and_increment(&key, &state.config).await {
        Ok(decision) => decision,
        Err(e) => {
            // Fail open
            tracing::error!(error = %e, "Rate limit check failed, allowing request");
            return next.run(req).await;
        }
    };

    if !decision.allowed {
        tracing::warn!(client = %key, limit = decision.limit, "Rate limit exceeded");
        let mut response = AppError::too_many_requests("Too many requests")
            .with_action("Wait before retrying")
            .into_response();
        let headers = response.headers_mut();
        write_headers(headers, &decision);
        headers.insert(header::RETRY_AFTER, HeaderValue::from(reset_secs(&decision)));
        return response;
    }

    let mut response = next.run(req).await;
    write_headers(response.headers_mut(), &decision);
    response
}

/// Whole seconds until the window resets, never zero
fn reset_secs(decision: &RateLimitDecision) -> u64 {
    let after = decision.reset_after;
    let secs = after.as_secs() + u64::from(after.subsec_nanos() > 0);
    secs.max(1)
}

fn write_headers(headers: &mut HeaderMap, decision: &RateLimitDecision) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(decision.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(decision.remaining));
    headers.insert(X_RATELIMIT_RESET, HeaderValue::from(reset_secs(decision)));
}
