//! User-facing notifications
//!
//! Transient banners shown after a submission attempt. Fire-and-forget:
//! nothing acknowledges them.

use derive_more::Display;
use serde::Serialize;

pub const SUBMISSION_SUCCEEDED_TEXT: &str =
    "Application submitted successfully! Check your email for your certificate.";

pub const SUBMISSION_FAILED_TEXT: &str =
    "Failed to submit application. Please try again or contact us directly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    #[display("success")]
    Success,
    #[display("error")]
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub kind: NotificationKind,
    pub text: String,
    pub issued_at_ms: i64,
}

impl Notification {
    pub fn new(kind: NotificationKind, text: impl Into<String>, issued_at_ms: i64) -> Self {
        Self {
            kind,
            text: text.into(),
            issued_at_ms,
        }
    }

    pub fn submission_succeeded(issued_at_ms: i64) -> Self {
        Self::new(
            NotificationKind::Success,
            SUBMISSION_SUCCEEDED_TEXT,
            issued_at_ms,
        )
    }

    pub fn submission_failed(issued_at_ms: i64) -> Self {
        Self::new(NotificationKind::Error, SUBMISSION_FAILED_TEXT, issued_at_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_and_serialization() {
        assert_eq!(NotificationKind::Success.to_string(), "success");
        assert_eq!(NotificationKind::Error.to_string(), "error");

        let json = serde_json::to_value(Notification::submission_failed(42)).unwrap();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["issuedAtMs"], 42);
        assert!(json["text"].as_str().unwrap().contains("try again"));
    }
}
