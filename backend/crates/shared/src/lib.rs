//! Shared Kernel - Domain-crossing minimal core
//!
//! The "smallest core" of vocabulary shared by every crate in the join
//! service:
//! - Common error types and result aliases
//! - Typed identifiers
//!
//! Only things that have the same meaning in every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
