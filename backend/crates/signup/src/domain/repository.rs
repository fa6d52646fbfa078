//! Repository Traits
//!
//! Interfaces for form session storage. Implementation is in infrastructure layer.

use std::sync::Arc;

use kernel::id::FormSessionId;

use crate::domain::entity::form_session::FormSession;
use crate::error::SignupResult;

/// FormSession repository trait
///
/// Sessions are shared: every caller holding the `Arc` sees the same form
/// and the same in-flight flag.
#[trait_variant::make(FormSessionRepository: Send)]
pub trait LocalFormSessionRepository {
    /// Store a new session
    async fn insert(&self, session: Arc<FormSession>) -> SignupResult<()>;

    /// Get a session by ID
    async fn find(&self, id: &FormSessionId) -> SignupResult<Option<Arc<FormSession>>>;

    /// Remove a session; returns whether it existed
    async fn remove(&self, id: &FormSessionId) -> SignupResult<bool>;

    /// Remove sessions untouched for longer than `max_idle_ms`
    /// Sessions with a submission in flight are kept
    async fn remove_idle(&self, now_ms: i64, max_idle_ms: i64) -> SignupResult<u64>;
}
