//! Signup Error Types
//!
//! This module provides signup-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! These are request-level failures only. A submission that reaches the
//! relay never ends in a `SignupError`; its outcome is a
//! [`SubmissionResult`](crate::domain::entity::submission::SubmissionResult).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::entity::application_form::ValidationErrors;

/// Signup-specific result type alias
pub type SignupResult<T> = Result<T, SignupError>;

/// Signup-specific error variants
#[derive(Debug, Error)]
pub enum SignupError {
    /// Form session not found or already discarded
    #[error("Form session not found")]
    SessionNotFound,

    /// A submission is already in flight for this session
    #[error("A submission is already in progress")]
    SubmissionInProgress,

    /// One or more form fields failed validation
    #[error("Application form is invalid: {0}")]
    Validation(ValidationErrors),

    /// No saved certificate under that name
    #[error("Certificate not found")]
    CertificateNotFound,

    /// Requested certificate name is not a plain file name
    #[error("Invalid certificate file name")]
    InvalidFileName,

    /// Local certificate storage failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SignupError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SignupError::SessionNotFound | SignupError::CertificateNotFound => {
                StatusCode::NOT_FOUND
            }
            SignupError::SubmissionInProgress => StatusCode::CONFLICT,
            SignupError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SignupError::InvalidFileName => StatusCode::BAD_REQUEST,
            SignupError::Storage(_) | SignupError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SignupError::SessionNotFound | SignupError::CertificateNotFound => ErrorKind::NotFound,
            SignupError::SubmissionInProgress => ErrorKind::Conflict,
            SignupError::Validation(_) => ErrorKind::UnprocessableEntity,
            SignupError::InvalidFileName => ErrorKind::BadRequest,
            SignupError::Storage(_) | SignupError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Validation failures carry the per-field list as `details`; server
    /// errors are reduced to a generic message.
    pub fn to_app_error(&self) -> AppError {
        match self {
            SignupError::Validation(errors) => {
                AppError::unprocessable("Application form is incomplete or invalid")
                    .with_action("Correct the listed fields and submit again")
                    .with_details(serde_json::to_value(errors).unwrap_or_default())
            }
            SignupError::SubmissionInProgress => AppError::conflict(self.to_string())
                .with_action("Wait for the current submission to finish"),
            SignupError::SessionNotFound => {
                AppError::not_found(self.to_string()).with_action("Start a new form session")
            }
            SignupError::CertificateNotFound => AppError::not_found(self.to_string()),
            SignupError::InvalidFileName => AppError::bad_request(self.to_string()),
            SignupError::Storage(_) | SignupError::Internal(_) => {
                AppError::internal("Internal server error")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            SignupError::Storage(e) => {
                tracing::error!(error = %e, "Signup storage error");
            }
            SignupError::Internal(msg) => {
                tracing::error!(message = %msg, "Signup internal error");
            }
            SignupError::SubmissionInProgress => {
                tracing::warn!("Submission rejected: already in progress");
            }
            SignupError::InvalidFileName => {
                tracing::warn!("Rejected certificate file name");
            }
            _ => {
                tracing::debug!(error = %self, "Signup error");
            }
        }
    }
}

impl From<SignupError> for AppError {
    fn from(err: SignupError) -> Self {
        let app_error = err.to_app_error();
        match err {
            SignupError::Storage(source) => app_error.with_source(source),
            _ => app_error,
        }
    }
}

impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
