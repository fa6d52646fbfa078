//! Gateway Traits
//!
//! Interfaces to the outside world used by the submit step: the e-mail
//! relay, the local certificate store, the clock and the notification
//! channel. Implementations are in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::FormSessionId;
use platform::mail::{RelayError, TemplateParams};

use crate::domain::entity::form_session::FormSession;
use crate::domain::entity::notification::{Notification, NotificationKind};
use crate::error::SignupResult;

/// Transactional e-mail relay
#[trait_variant::make(EmailRelay: Send)]
pub trait LocalEmailRelay {
    /// Deliver one templated message
    async fn send(
        &self,
        service_id: &str,
        template_id: &str,
        params: &TemplateParams,
    ) -> Result<(), RelayError>;
}

/// Local copy of issued certificates
///
/// Copies are kept per form session, so only the holder of the session id
/// can read one back and equal names from different sessions never collide.
#[trait_variant::make(CertificateStore: Send)]
pub trait LocalCertificateStore {
    /// Save (or overwrite) the session's certificate under `file_name`
    async fn save(
        &self,
        session_id: &FormSessionId,
        file_name: &str,
        bytes: &[u8],
    ) -> SignupResult<()>;

    /// Load a certificate saved for the session
    async fn load(
        &self,
        session_id: &FormSessionId,
        file_name: &str,
    ) -> SignupResult<Option<Vec<u8>>>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Fire-and-forget user notification channel
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// A session is its own notification channel: the banner is kept until
/// the next one replaces it and shows up in session reads.
impl Notifier for FormSession {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                tracing::info!(session_id = %self.id(), kind = %notification.kind, "Notify");
            }
            NotificationKind::Error => {
                tracing::warn!(session_id = %self.id(), kind = %notification.kind, "Notify");
            }
        }
        self.record_notification(notification);
    }
}
