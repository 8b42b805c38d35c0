//! User-facing notification seam for domain failures.

use crate::error::DomainError;

/// Sink for user-visible failure notifications.
///
/// When the backend reports a domain failure inside a response envelope, the
/// pipeline emits exactly one notification through this trait, independent of
/// how the caller handles the returned error. Applications plug in their own
/// implementation (toast, status bar, stderr); the default logs a warning.
pub trait Notifier: Send + Sync {
    /// Report a domain failure to the user.
    fn notify(&self, error: &DomainError);
}

/// Default notifier that reports failures through `tracing`.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, error: &DomainError) {
        tracing::warn!(code = ?error.code, "{}", error.message);
    }
}
