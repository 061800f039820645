//! Infrastructure Layer
//!
//! Listing queries for the repositories provided by `auth`.

pub mod memory;
pub mod postgres;
