//! Form Session Use Case
//!
//! Create, read, edit and discard join-form sessions.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::FormSessionId;

use crate::application::config::SignupConfig;
use crate::domain::entity::application_form::{ApplicationForm, FormPatch};
use crate::domain::entity::form_session::{FormSession, SessionBusy};
use crate::domain::repository::FormSessionRepository;
use crate::error::{SignupError, SignupResult};

/// Form Session Use Case
pub struct FormSessionUseCase<R>
where
    R: FormSessionRepository,
{
    repo: Arc<R>,
    config: Arc<SignupConfig>,
}

impl<R> FormSessionUseCase<R>
where
    R: FormSessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<SignupConfig>) -> Self {
        Self { repo, config }
    }

    /// Start a new, empty form
    pub async fn create(&self) -> SignupResult<Arc<FormSession>> {
        let session = Arc::new(FormSession::new());
        self.repo.insert(Arc::clone(&session)).await?;

        tracing::debug!(session_id = %session.id(), "Form session created");
        Ok(session)
    }

    pub async fn get(&self, id: &FormSessionId) -> SignupResult<Arc<FormSession>> {
        self.repo
            .find(id)
            .await?
            .ok_or(SignupError::SessionNotFound)
    }

    /// Apply a partial edit; refused while a submission is in flight
    pub async fn update(
        &self,
        id: &FormSessionId,
        patch: FormPatch,
    ) -> SignupResult<ApplicationForm> {
        let session = self.get(id).await?;
        session
            .update(patch)
            .map_err(|SessionBusy| SignupError::SubmissionInProgress)
    }

    pub async fn discard(&self, id: &FormSessionId) -> SignupResult<()> {
        if !self.repo.remove(id).await? {
            return Err(SignupError::SessionNotFound);
        }
        tracing::debug!(session_id = %id, "Form session discarded");
        Ok(())
    }

    /// Drop sessions idle past the configured TTL
    pub async fn cleanup_idle(&self) -> SignupResult<u64> {
        let removed = self
            .repo
            .remove_idle(
                Utc::now().timestamp_millis(),
                self.config.session_idle_ttl_ms(),
            )
            .await?;

        if removed > 0 {
            tracing::info!(removed, "Idle form sessions removed");
        }
        Ok(removed)
    }
}
