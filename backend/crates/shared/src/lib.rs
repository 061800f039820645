//! Shared Kernel - vocabulary every backend crate agrees on
//!
//! - [`error`]: the unified [`AppError`](error::app_error::AppError) and its
//!   Problem Details rendering
//! - [`id`]: typed UUID identifiers for users, issued tokens and courses
//! - `extract` (feature `axum`): request extractors that reject with `AppError`
//!
//! Anything here is hard to change, so keep it small.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
#[cfg(feature = "axum")]
pub mod extract;
pub mod id;
