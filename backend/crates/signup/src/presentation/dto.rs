//! API DTOs (Data Transfer Objects)

use serde::Serialize;
use uuid::Uuid;

use crate::domain::entity::application_form::ApplicationForm;
use crate::domain::entity::form_session::FormSession;
use crate::domain::entity::notification::Notification;
use crate::domain::entity::submission::SubmissionResult;
use crate::domain::value_object::applicant_role::ApplicantRole;

/// Response for GET/PATCH /api/join/sessions/{id} and POST /api/join/sessions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub form: ApplicationForm,
    pub submitting: bool,
    pub notification: Option<Notification>,
    /// Last certificate saved, downloadable from `/sessions/{id}/certificate`
    pub certificate_file: Option<String>,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

impl From<&FormSession> for SessionResponse {
    fn from(session: &FormSession) -> Self {
        Self {
            session_id: session.id().into_uuid(),
            form: session.form(),
            submitting: session.is_submitting(),
            notification: session.last_notification(),
            certificate_file: session.certificate_file(),
            created_at_ms: session.created_at_ms(),
            updated_at_ms: session.touched_at_ms(),
        }
    }
}

/// Response for POST /api/join/sessions/{id}/submit
///
/// Failures carry no reason; the notification text is all the client gets.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub notification: Option<Notification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_file: Option<String>,
}

impl SubmitResponse {
    pub fn new(result: &SubmissionResult, notification: Option<Notification>) -> Self {
        Self {
            success: result.is_success(),
            notification,
            certificate_file: result.certificate_file().map(str::to_string),
        }
    }
}

/// One entry of GET /api/join/roles
#[derive(Debug, Clone, Serialize)]
pub struct RoleOption {
    pub value: &'static str,
    pub label: String,
}

impl From<ApplicantRole> for RoleOption {
    fn from(role: ApplicantRole) -> Self {
        Self {
            value: role.code(),
            label: role.label(),
        }
    }
}
