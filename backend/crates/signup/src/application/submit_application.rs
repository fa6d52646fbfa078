//! Submit Application Use Case
//!
//! Turns a completed join form into a delivered certificate:
//! validate, render, e-mail through the relay, then save a local copy,
//! notify the applicant and reset the form.
//!
//! ## Outcomes
//! Once the form is valid there are exactly two outcomes, see
//! [`SubmissionResult`]. Render and dispatch failures are logged with their
//! cause and reported to the applicant with one generic message; the form is
//! kept so they can retry.
//!
//! Requests rejected before any work starts (a submission already in flight,
//! an invalid form) are `Err(SignupError)` and touch nothing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::SubmissionId;
use platform::crypto::sha256_hex;
use platform::mail::{RelayError, TemplateParam, TemplateParams};
use thiserror::Error;

use crate::application::config::SignupConfig;
use crate::domain::entity::application_form::ValidatedApplication;
use crate::domain::entity::certificate::certificate_file_name;
use crate::domain::entity::form_session::FormSession;
use crate::domain::entity::notification::Notification;
use crate::domain::entity::submission::{SubmissionFailure, SubmissionResult};
use crate::domain::gateway::{CertificateStore, Clock, EmailRelay, Notifier};
use crate::domain::services::{CertificateRenderer, RenderError};
use crate::domain::value_object::applicant_message::ApplicantMessage;
use crate::domain::value_object::funding_amount::FundingAmount;
use crate::error::{SignupError, SignupResult};

/// Why a dispatch attempt failed; logged, never shown
#[derive(Debug, Error)]
enum DispatchError {
    #[error("certificate rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error(transparent)]
    Relay(#[from] RelayError),
}

/// Submit Application Use Case
pub struct SubmitApplicationUseCase<E, S>
where
    E: EmailRelay,
    S: CertificateStore,
{
    relay: Arc<E>,
    store: Arc<S>,
    renderer: Arc<dyn CertificateRenderer>,
    clock: Arc<dyn Clock>,
    config: Arc<SignupConfig>,
}

impl<E, S> SubmitApplicationUseCase<E, S>
where
    E: EmailRelay + Send + Sync,
    S: CertificateStore + Send + Sync,
{
    pub fn new(
        relay: Arc<E>,
        store: Arc<S>,
        renderer: Arc<dyn CertificateRenderer>,
        clock: Arc<dyn Clock>,
        config: Arc<SignupConfig>,
    ) -> Self {
        Self {
            relay,
            store,
            renderer,
            clock,
            config,
        }
    }

    /// Submit the session's form, notifying through the session itself
    pub async fn submit(&self, session: &FormSession) -> SignupResult<SubmissionResult> {
        self.execute(session, session).await
    }

    pub async fn execute<N>(
        &self,
        session: &FormSession,
        notifier: &N,
    ) -> SignupResult<SubmissionResult>
    where
        N: Notifier + Sync + ?Sized,
    {
        // Released on every return path below
        let _submitting = session
            .begin_submission()
            .ok_or(SignupError::SubmissionInProgress)?;

        let application = session.form().validate().map_err(SignupError::Validation)?;

        let submission_id = SubmissionId::new();
        let now = self.clock.now();
        let certificate_file = certificate_file_name(application.name.as_str());

        tracing::info!(
            session_id = %session.id(),
            submission_id = %submission_id,
            role = %application.role,
            "Submitting application"
        );

        match self.dispatch(&application, &certificate_file, now).await {
            Ok(certificate) => {
                match self
                    .store
                    .save(&session.id(), &certificate_file, &certificate)
                    .await
                {
                    Ok(()) => session.record_certificate(certificate_file.as_str()),
                    Err(e) => tracing::warn!(
                        submission_id = %submission_id,
                        certificate_file = %certificate_file,
                        error = %e,
                        "Certificate sent but local save failed"
                    ),
                }

                notifier.notify(Notification::submission_succeeded(now.timestamp_millis()));
                session.reset_form();

                tracing::info!(
                    session_id = %session.id(),
                    submission_id = %submission_id,
                    certificate_file = %certificate_file,
                    certificate_sha256 = %sha256_hex(&certificate),
                    "Application submitted"
                );

                Ok(SubmissionResult::Success { certificate_file })
            }
            Err(e) => {
                tracing::error!(
                    session_id = %session.id(),
                    submission_id = %submission_id,
                    error = %e,
                    "Application submission failed"
                );

                notifier.notify(Notification::submission_failed(now.timestamp_millis()));

                Ok(SubmissionResult::Failed(SubmissionFailure::new(e.to_string())))
            }
        }
    }

    /// Render the certificate and hand it to the relay
    ///
    /// Returns the certificate bytes for the local save.
    async fn dispatch(
        &self,
        application: &ValidatedApplication,
        certificate_file: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<u8>, DispatchError> {
        let certificate = self.renderer.render(
            application.name.as_str(),
            application.role.code(),
            application.organization.as_str(),
            now,
        )?;

        let relay = &self.config.relay;
        if !relay.is_complete() {
            return Err(RelayError::NotConfigured("relay credentials").into());
        }

        let params = relay_params(
            application,
            &certificate,
            certificate_file,
            &self.config.sender_name,
        );
        self.relay
            .send(&relay.service_id, &relay.template_id, &params)
            .await?;

        Ok(certificate)
    }
}

/// Template parameters for the confirmation e-mail
///
/// Optional fields are always present, filled with their placeholder text
/// when the applicant left them empty.
pub fn relay_params(
    application: &ValidatedApplication,
    certificate: &[u8],
    certificate_file: &str,
    sender_name: &str,
) -> TemplateParams {
    let text = |s: &str| TemplateParam::Text(s.to_string());

    TemplateParams::from([
        ("to_name".to_string(), text(application.name.as_str())),
        ("to_email".to_string(), text(application.email.as_str())),
        ("from_name".to_string(), text(sender_name)),
        (
            "organization".to_string(),
            text(application.organization.as_str()),
        ),
        ("role".to_string(), text(application.role.code())),
        (
            "funding_amount".to_string(),
            text(FundingAmount::relay_value(application.funding_amount.as_ref())),
        ),
        (
            "message".to_string(),
            text(ApplicantMessage::relay_value(application.message.as_ref())),
        ),
        (
            "certificate_pdf".to_string(),
            TemplateParam::Bytes(certificate.to_vec()),
        ),
        ("certificate_file".to_string(), text(certificate_file)),
    ])
}
