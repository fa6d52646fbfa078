//! In-Memory Repository Implementation
//!
//! Form sessions live only as long as the process.

use std::collections::HashMap;
use std::sync::Arc;

use kernel::id::FormSessionId;
use tokio::sync::RwLock;

use crate::domain::entity::form_session::FormSession;
use crate::domain::repository::FormSessionRepository;
use crate::error::SignupResult;

/// In-memory form session store
#[derive(Debug, Clone, Default)]
pub struct InMemoryFormSessionRepository {
    sessions: Arc<RwLock<HashMap<FormSessionId, Arc<FormSession>>>>,
}

impl InMemoryFormSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl FormSessionRepository for InMemoryFormSessionRepository {
    async fn insert(&self, session: Arc<FormSession>) -> SignupResult<()> {
        self.sessions.write().await.insert(session.id(), session);
        Ok(())
    }

    async fn find(&self, id: &FormSessionId) -> SignupResult<Option<Arc<FormSession>>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn remove(&self, id: &FormSessionId) -> SignupResult<bool> {
        Ok(self.sessions.write().await.remove(id).is_some())
    }

    async fn remove_idle(&self, now_ms: i64, max_idle_ms: i64) -> SignupResult<u64> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_idle(now_ms, max_idle_ms));
        Ok((before - sessions.len()) as u64)
    }
}
