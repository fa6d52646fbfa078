//! Form Session Entity
//!
//! One visitor's join form plus the state the page would otherwise keep:
//! whether a submission is in flight, the last banner shown and the last
//! certificate saved.
//!
//! ## Invariants
//! - At most one submission is in flight per session
//! - The in-flight flag is cleared on every exit path of a submission
//!   ([`SubmissionGuard`] clears it on drop, including during unwinding)
//! - Field edits are refused while a submission is in flight; the form
//!   snapshot is taken after the flag is set, so no accepted edit is lost
//!   to the reset that follows a successful submission
//!
//! Locks are held only for a field copy and never across an `.await`.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use kernel::id::FormSessionId;

use crate::domain::entity::application_form::{ApplicationForm, FormPatch};
use crate::domain::entity::notification::Notification;

/// Returned when an edit arrives while a submission is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionBusy;

#[derive(Debug)]
pub struct FormSession {
    id: FormSessionId,
    form: Mutex<ApplicationForm>,
    submitting: AtomicBool,
    notification: Mutex<Option<Notification>>,
    certificate_file: Mutex<Option<String>>,
    created_at_ms: i64,
    touched_at_ms: AtomicI64,
}

impl FormSession {
    pub fn new() -> Self {
        Self::with_id(FormSessionId::new(), Utc::now().timestamp_millis())
    }

    pub fn with_id(id: FormSessionId, now_ms: i64) -> Self {
        Self {
            id,
            form: Mutex::new(ApplicationForm::default()),
            submitting: AtomicBool::new(false),
            notification: Mutex::new(None),
            certificate_file: Mutex::new(None),
            created_at_ms: now_ms,
            touched_at_ms: AtomicI64::new(now_ms),
        }
    }

    pub fn id(&self) -> FormSessionId {
        self.id
    }

    pub fn created_at_ms(&self) -> i64 {
        self.created_at_ms
    }

    pub fn touched_at_ms(&self) -> i64 {
        self.touched_at_ms.load(Ordering::Relaxed)
    }

    /// Snapshot of the current form
    pub fn form(&self) -> ApplicationForm {
        lock(&self.form).clone()
    }

    /// Apply a field update unless a submission is in flight
    ///
    /// The flag is read under the form lock: an accepted edit is either
    /// visible to the submission's snapshot or lands after it has ended.
    pub fn update(&self, patch: FormPatch) -> Result<ApplicationForm, SessionBusy> {
        let mut form = lock(&self.form);
        if self.is_submitting() {
            return Err(SessionBusy);
        }
        form.apply(patch);
        self.touch();
        Ok(form.clone())
    }

    pub fn reset_form(&self) {
        lock(&self.form).reset();
        self.touch();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Enter the submitting state
    ///
    /// Returns `None` when a submission is already in flight.
    pub fn begin_submission(&self) -> Option<SubmissionGuard<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| {
                self.touch();
                SubmissionGuard {
                    flag: &self.submitting,
                }
            })
    }

    pub fn last_notification(&self) -> Option<Notification> {
        lock(&self.notification).clone()
    }

    pub fn record_notification(&self, notification: Notification) {
        *lock(&self.notification) = Some(notification);
    }

    /// Name of the last certificate saved for this session
    pub fn certificate_file(&self) -> Option<String> {
        lock(&self.certificate_file).clone()
    }

    pub fn record_certificate(&self, file_name: impl Into<String>) {
        *lock(&self.certificate_file) = Some(file_name.into());
    }

    /// Idle for longer than `max_idle_ms` and not submitting
    pub fn is_idle(&self, now_ms: i64, max_idle_ms: i64) -> bool {
        !self.is_submitting() && now_ms.saturating_sub(self.touched_at_ms()) > max_idle_ms
    }

    fn touch(&self) {
        self.touched_at_ms
            .fetch_max(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped "submission in flight" marker
#[derive(Debug)]
#[must_use = "the submission ends as soon as the guard is dropped"]
pub struct SubmissionGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmissionGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

// A panic while holding a field lock leaves plain data behind; keep using it.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::notification::NotificationKind;

    fn name_patch(name: &str) -> FormPatch {
        FormPatch {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_session_is_empty() {
        let session = FormSession::new();
        assert!(session.form().is_empty());
        assert!(!session.is_submitting());
        assert!(session.last_notification().is_none());
        assert!(session.certificate_file().is_none());
    }

    #[test]
    fn test_guard_sets_and_clears_flag() {
        let session = FormSession::new();
        {
            let _guard = session.begin_submission().unwrap();
            assert!(session.is_submitting());
            assert!(session.begin_submission().is_none());
        }
        assert!(!session.is_submitting());
        assert!(session.begin_submission().is_some());
    }

    #[test]
    fn test_guard_clears_flag_on_panic() {
        let session = FormSession::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = session.begin_submission().unwrap();
            panic!("render blew up");
        }));
        assert!(result.is_err());
        assert!(!session.is_submitting());
    }

    #[test]
    fn test_update_refused_while_submitting() {
        let session = FormSession::new();
        session.update(name_patch("Jane")).unwrap();

        let guard = session.begin_submission().unwrap();
        assert_eq!(session.update(name_patch("Mallory")), Err(SessionBusy));
        drop(guard);

        assert_eq!(session.form().name, "Jane");
        assert_eq!(session.update(name_patch("Jane Doe")).unwrap().name, "Jane Doe");
    }

    #[test]
    fn test_accepted_edit_never_lost_to_reset() {
        use std::sync::Barrier;

        for _ in 0..500 {
            let session = FormSession::new();
            session.update(name_patch("Jane")).unwrap();
            let barrier = Barrier::new(2);

            let (edited, snapshot) = std::thread::scope(|s| {
                let editor = s.spawn(|| {
                    barrier.wait();
                    session.update(name_patch("Jane Doe")).is_ok()
                });

                barrier.wait();
                let snapshot = {
                    let _guard = session.begin_submission().unwrap();
                    let snapshot = session.form();
                    session.reset_form();
                    snapshot
                };
                (editor.join().unwrap(), snapshot)
            });

            if edited {
                assert!(
                    snapshot.name == "Jane Doe" || session.form().name == "Jane Doe",
                    "accepted edit was neither submitted nor kept"
                );
            }
        }
    }

    #[test]
    fn test_reset_form() {
        let session = FormSession::new();
        session.update(name_patch("Jane")).unwrap();
        session.reset_form();
        assert!(session.form().is_empty());
    }

    #[test]
    fn test_notification_replaced() {
        let session = FormSession::new();
        session.record_notification(Notification::submission_failed(1));
        session.record_notification(Notification::submission_succeeded(2));
        let last = session.last_notification().unwrap();
        assert_eq!(last.kind, NotificationKind::Success);
        assert_eq!(last.issued_at_ms, 2);
    }

    #[test]
    fn test_idle_detection() {
        let session = FormSession::with_id(FormSessionId::new(), 1_000);
        assert!(!session.is_idle(1_500, 1_000));
        assert!(session.is_idle(2_001, 1_000));

        let _guard = session.begin_submission().unwrap();
        assert!(!session.is_idle(i64::MAX, 1_000));
    }
}
