//! Submission outcome
//!
//! Exactly two outcomes exist. The failure reason is for logs only; every
//! failure looks the same to the applicant.

use derive_more::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// The relay accepted the message
    Success {
        /// Name the certificate was saved under
        certificate_file: String,
    },
    /// Rendering, encoding or dispatch failed
    Failed(SubmissionFailure),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }

    pub fn certificate_file(&self) -> Option<&str> {
        match self {
            SubmissionResult::Success { certificate_file } => Some(certificate_file),
            SubmissionResult::Failed(_) => None,
        }
    }
}

/// Opaque failure reason
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{reason}")]
pub struct SubmissionFailure {
    reason: String,
}

impl SubmissionFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}
