//! Single-flight token refresh
//!
//! When several requests hit 401 at once only one refresh call goes out.
//! The first caller becomes the leader and runs it; later callers wait for
//! the leader's outcome and get the same token or the same failure.
//! State: `Idle -> Refreshing -> Idle`.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use crate::error::RefreshFailure;

/// New access token, or why there is none
pub type RefreshOutcome = Result<String, RefreshFailure>;

enum Phase {
    Idle,
    Refreshing {
        generation: u64,
        done: watch::Receiver<Option<RefreshOutcome>>,
    },
}

struct Inner {
    phase: Phase,
    generation: u64,
}

#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<Mutex<Inner>>,
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                phase: Phase::Idle,
                generation: 0,
            })),
        }
    }
}

enum Role {
    Leader(watch::Sender<Option<RefreshOutcome>>, u64),
    Follower(watch::Receiver<Option<RefreshOutcome>>),
}

/// Returns the coordinator to `Idle` even if the leader is dropped mid-refresh.
struct IdleOnDrop {
    inner: Arc<Mutex<Inner>>,
    generation: u64,
}

impl Drop for IdleOnDrop {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if matches!(inner.phase, Phase::Refreshing { generation, .. } if generation == self.generation)
        {
            inner.phase = Phase::Idle;
        }
    }
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_refreshing(&self) -> bool {
        matches!(
            self.inner.lock().unwrap_or_else(PoisonError::into_inner).phase,
            Phase::Refreshing { .. }
        )
    }

    /// Run `refresh` unless one is already in flight, in which case join it.
    pub async fn refresh<F, Fut>(&self, refresh: F) -> RefreshOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshOutcome>,
    {
        let role = {
            let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            match &inner.phase {
                Phase::Refreshing { done, .. } => Role::Follower(done.clone()),
                Phase::Idle => {
                    inner.generation += 1;
                    let generation = inner.generation;
                    let (tx, rx) = watch::channel(None);
                    inner.phase = Phase::Refreshing {
                        generation,
                        done: rx,
                    };
                    Role::Leader(tx, generation)
                }
            }
        };

        match role {
            Role::Leader(tx, generation) => {
                let _idle = IdleOnDrop {
                    inner: self.inner.clone(),
                    generation,
                };
                tracing::debug!(generation, "Refreshing access token");

                let outcome = refresh().await;
                if let Err(failure) = &outcome {
                    tracing::warn!(error = %failure, "Token refresh failed");
                }
                tx.send_replace(Some(outcome.clone()));
                outcome
            }
            Role::Follower(mut rx) => {
                tracing::debug!("Joining in-flight token refresh");
                let outcome = rx
                    .wait_for(Option::is_some)
                    .await
                    .map(|done| done.clone());
                match outcome {
                    Ok(Some(outcome)) => outcome,
                    _ => Err(RefreshFailure::Interrupted),
                }
            }
        }
    }
}
