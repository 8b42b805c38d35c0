//! Single-flight credential refresh.
//!
//! Any number of requests can hit session expiry at the same time; the
//! coordinator collapses them into one re-authentication call and broadcasts
//! its outcome to every waiter. This is the only component in the crate that
//! needs genuine concurrent-access coordination.

use std::mem;
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::auth::{Credential, SessionManager};

/// Signal delivered to waiters when the single in-flight refresh failed.
///
/// Carries no detail on purpose: each caller propagates the failure it
/// originally observed, not the refresh failure.
#[derive(Debug, Clone, Copy)]
pub struct RefreshFailed;

/// Outcome of a refresh attempt, identical for every waiter of that attempt.
pub type RefreshOutcome = Result<Credential, RefreshFailed>;

enum State {
    Idle,
    Refreshing {
        // FIFO queue; the triggering caller is the first entry.
        waiters: Vec<oneshot::Sender<RefreshOutcome>>,
    },
}

/// Serializes concurrent refresh attempts into one network call.
///
/// State machine: `Idle -> Refreshing` on the first trigger, back to `Idle`
/// when the single in-flight re-authentication settles. While `Refreshing`,
/// further triggers only enqueue a waiter. All waiters of one attempt
/// observe the same outcome; on failure, session teardown runs exactly once
/// regardless of how many waiters exist.
pub struct RefreshCoordinator {
    state: Mutex<State>,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::Idle),
        }
    }

    /// Wait for a refreshed credential.
    ///
    /// If no refresh is in flight, one is started; otherwise the caller is
    /// queued behind the in-flight attempt. Resolves once the underlying
    /// re-authentication settles. Callers must not invoke this for a request
    /// that already carries the replay marker; the pipeline enforces that.
    pub async fn request_refresh(self: &Arc<Self>, manager: &SessionManager) -> RefreshOutcome {
        let receiver = {
            let mut state = self.state.lock().unwrap();
            let (sender, receiver) = oneshot::channel();
            match &mut *state {
                State::Refreshing { waiters } => {
                    debug!(queued = waiters.len(), "refresh in flight, queueing waiter");
                    waiters.push(sender);
                }
                State::Idle => {
                    *state = State::Refreshing {
                        waiters: vec![sender],
                    };
                    let coordinator = Arc::clone(self);
                    let manager = manager.clone();
                    tokio::spawn(async move {
                        coordinator.run_refresh(manager).await;
                    });
                }
            }
            receiver
        };

        // The sender side only drops without resolving if the refresh task
        // was torn down with the runtime; treat that as a failed attempt.
        receiver.await.unwrap_or(Err(RefreshFailed))
    }

    /// Drive the single in-flight refresh to completion and broadcast.
    async fn run_refresh(&self, manager: SessionManager) {
        let outcome = match manager.reauthenticate().await {
            Ok(session) => Ok(session.credential),
            Err(error) => {
                warn!(%error, "refresh failed, ending session");
                if let Err(error) = manager.logout() {
                    warn!(%error, "session teardown failed");
                }
                Err(RefreshFailed)
            }
        };

        let waiters = {
            let mut state = self.state.lock().unwrap();
            match mem::replace(&mut *state, State::Idle) {
                State::Refreshing { waiters } => waiters,
                State::Idle => Vec::new(),
            }
        };

        debug!(
            waiters = waiters.len(),
            refreshed = outcome.is_ok(),
            "broadcasting refresh outcome"
        );
        for waiter in waiters {
            // A waiter may have been dropped by its caller; that is fine.
            let _ = waiter.send(outcome.clone());
        }
    }
}

impl Default for RefreshCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RefreshCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        let label = match &*state {
            State::Idle => "Idle",
            State::Refreshing { .. } => "Refreshing",
        };
        f.debug_struct("RefreshCoordinator")
            .field("state", &label)
            .finish()
    }
}
