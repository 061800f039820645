//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations that know nothing about courses or users:
//! - Cryptographic helpers (SHA-256, random tokens)
//! - Password hashing (Argon2id, NIST SP 800-63B policy)
//! - Client IP resolution behind proxies
//! - Fixed-window rate limiting
//! - Outbound transactional mail

pub mod client;
pub mod crypto;
pub mod mail;
pub mod password;
pub mod rate_limit;
