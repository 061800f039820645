//! Entity Module

pub mod issued_token;
pub mod user;
