//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no domain knowledge:
//! - Hashing and Base64 helpers
//! - HTTP client for the transactional e-mail relay

pub mod crypto;
pub mod mail;
