//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use kernel::id::FormSessionId;
use uuid::Uuid;

use crate::application::config::SignupConfig;
use crate::application::form_session::FormSessionUseCase;
use crate::application::submit_application::SubmitApplicationUseCase;
use crate::domain::entity::application_form::FormPatch;
use crate::domain::gateway::{CertificateStore, Clock, EmailRelay};
use crate::domain::repository::FormSessionRepository;
use crate::domain::services::CertificateRenderer;
use crate::domain::value_object::applicant_role::ApplicantRole;
use crate::error::{SignupError, SignupResult};
use crate::presentation::dto::{RoleOption, SessionResponse, SubmitResponse};

/// Shared state for signup handlers
pub struct SignupAppState<R, E, S>
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub relay: Arc<E>,
    pub store: Arc<S>,
    pub renderer: Arc<dyn CertificateRenderer>,
    pub clock: Arc<dyn Clock>,
    pub config: Arc<SignupConfig>,
}

// Manual impl: only the `Arc`s are cloned, the backends need not be `Clone`.
impl<R, E, S> Clone for SignupAppState<R, E, S>
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            relay: Arc::clone(&self.relay),
            store: Arc::clone(&self.store),
            renderer: Arc::clone(&self.renderer),
            clock: Arc::clone(&self.clock),
            config: Arc::clone(&self.config),
        }
    }
}

impl<R, E, S> SignupAppState<R, E, S>
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    fn sessions(&self) -> FormSessionUseCase<R> {
        FormSessionUseCase::new(self.repo.clone(), self.config.clone())
    }

    fn submissions(&self) -> SubmitApplicationUseCase<E, S> {
        SubmitApplicationUseCase::new(
            self.relay.clone(),
            self.store.clone(),
            self.renderer.clone(),
            self.clock.clone(),
            self.config.clone(),
        )
    }
}

/// POST /api/join/sessions
pub async fn create_session<R, E, S>(
    State(state): State<SignupAppState<R, E, S>>,
) -> SignupResult<impl IntoResponse>
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    let session = state.sessions().create().await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::from(session.as_ref())),
    ))
}

/// GET /api/join/sessions/{id}
pub async fn get_session<R, E, S>(
    State(state): State<SignupAppState<R, E, S>>,
    Path(id): Path<Uuid>,
) -> SignupResult<Json<SessionResponse>>
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    let session = state.sessions().get(&FormSessionId::from_uuid(id)).await?;
    Ok(Json(SessionResponse::from(session.as_ref())))
}

/// PATCH /api/join/sessions/{id}
pub async fn update_session<R, E, S>(
    State(state): State<SignupAppState<R, E, S>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<FormPatch>,
) -> SignupResult<Json<SessionResponse>>
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    let id = FormSessionId::from_uuid(id);
    let sessions = state.sessions();
    sessions.update(&id, patch).await?;

    let session = sessions.get(&id).await?;
    Ok(Json(SessionResponse::from(session.as_ref())))
}

/// DELETE /api/join/sessions/{id}
pub async fn delete_session<R, E, S>(
    State(state): State<SignupAppState<R, E, S>>,
    Path(id): Path<Uuid>,
) -> SignupResult<StatusCode>
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    state
        .sessions()
        .discard(&FormSessionId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/join/sessions/{id}/submit
///
/// 200 when the relay accepted the certificate, 502 when dispatch failed.
/// Both carry the notification shown to the applicant.
pub async fn submit_application<R, E, S>(
    State(state): State<SignupAppState<R, E, S>>,
    Path(id): Path<Uuid>,
) -> SignupResult<impl IntoResponse>
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    let session = state.sessions().get(&FormSessionId::from_uuid(id)).await?;
    let result = state.submissions().submit(&session).await?;

    let status = if result.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    Ok((
        status,
        Json(SubmitResponse::new(&result, session.last_notification())),
    ))
}

/// GET /api/join/sessions/{id}/certificate
///
/// The last certificate saved for this session, as an attachment named
/// after the applicant.
pub async fn download_certificate<R, E, S>(
    State(state): State<SignupAppState<R, E, S>>,
    Path(id): Path<Uuid>,
) -> SignupResult<impl IntoResponse>
where
    R: FormSessionRepository + Send + Sync + 'static,
    E: EmailRelay + Send + Sync + 'static,
    S: CertificateStore + Send + Sync + 'static,
{
    let id = FormSessionId::from_uuid(id);
    let session = state.sessions().get(&id).await?;
    let file_name = session
        .certificate_file()
        .ok_or(SignupError::CertificateNotFound)?;

    let bytes = state
        .store
        .load(&id, &file_name)
        .await?
        .ok_or(SignupError::CertificateNotFound)?;

    let disposition = HeaderValue::from_str(&content_disposition(&file_name))
        .map_err(|e| SignupError::Internal(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// GET /api/join/roles
pub async fn list_roles() -> Json<Vec<RoleOption>> {
    Json(ApplicantRole::ALL.into_iter().map(RoleOption::from).collect())
}

/// `attachment` disposition with an ASCII fallback name and the exact name
/// percent-encoded in `filename*`
fn content_disposition(file_name: &str) -> String {
    let fallback: String = file_name
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(file_name.len() * 3);
    for b in file_name.bytes() {
        if b.is_ascii_alphanumeric() || b"!#$&+-.^_`|~".contains(&b) {
            encoded.push(char::from(b));
        } else {
            encoded.push_str(&format!("%{:02X}", b));
        }
    }

    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition() {
        assert_eq!(
            content_disposition("Certificate_Jane_Doe.pdf"),
            "attachment; filename=\"Certificate_Jane_Doe.pdf\"; \
             filename*=UTF-8''Certificate_Jane_Doe.pdf"
        );
        assert_eq!(
            content_disposition("Certificate_José.pdf"),
            "attachment; filename=\"Certificate_Jos_.pdf\"; \
             filename*=UTF-8''Certificate_Jos%C3%A9.pdf"
        );
    }
}
