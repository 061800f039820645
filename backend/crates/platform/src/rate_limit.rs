//! Rate Limiting Infrastructure
//!
//! Fixed-window counters keyed by client. The store is a trait so a shared
//! backend can replace the in-process map when the API is scaled out.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
}

impl Default for RateLimitConfig {
    /// 100 requests per minute
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Rate limit check result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// Time until the current window closes
    pub reset_after: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum RateLimitError {
    #[error("Rate limit backend unavailable: {0}")]
    Backend(String),
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count one request for `key` and decide whether it may proceed
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitDecision, RateLimitError>;
}

struct Window {
    count: u32,
    started_at: Instant,
}

/// Single-process store backed by a concurrent map.
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    windows: DashMap<String, Window>,
    ops: AtomicU64,
}

/// Sweep closed windows every N checks so idle clients do not pile up.
const SWEEP_EVERY: u64 = 256;

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn decide(&self, key: &str, config: &RateLimitConfig, now: Instant) -> RateLimitDecision {
        // Entry API holds the shard lock for the whole read-modify-write.
        let (count, started_at) = match self.windows.entry(key.to_string()) {
            Entry::Occupied(mut occupied) => {
                let window = occupied.get_mut();
                if now.duration_since(window.started_at) >= config.window {
                    window.count = 1;
                    window.started_at = now;
                } else {
                    window.count = window.count.saturating_add(1);
                }
                (window.count, window.started_at)
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Window {
                    count: 1,
                    started_at: now,
                });
                (1, now)
            }
        };

        if self.ops.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            self.windows
                .retain(|_, w| now.duration_since(w.started_at) < config.window);
        }

        RateLimitDecision {
            allowed: count <= config.max_requests,
            limit: config.max_requests,
            remaining: config.max_requests.saturating_sub(count),
            reset_after: config
                .window
                .saturating_sub(now.duration_since(started_at)),
        }
    }
}

impl RateLimitStore for InMemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitDecision, RateLimitError> {
        Ok(self.decide(key, config, Instant::now()))
    }
}
