//! Session store: the single owner of the current credential.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::endpoints::User;
use crate::error::StorageError;

use super::session::Session;
use super::token::Credential;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Durable backing for the session store.
///
/// The store writes through on every mutation, so the durable copy and the
/// in-memory copy never disagree across a crash or reload.
pub trait SessionCache: Send + Sync {
    /// Persist the session.
    fn store(&self, session: &Session) -> Result<(), StorageError>;

    /// Load the previously persisted session, if any.
    fn load(&self) -> Result<Option<Session>, StorageError>;

    /// Remove the persisted session.
    fn clear(&self) -> Result<(), StorageError>;
}

struct StoreInner {
    session: RwLock<Option<Session>>,
    cache: Option<Box<dyn SessionCache>>,
}

/// Holds the current session and credential.
///
/// Pure state: no network or validation logic. The credential is read by
/// every outgoing request and written only by the session manager on success
/// paths. Clone is cheap; clones share the same state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Create a store with no durable backing.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(StoreInner {
                session: RwLock::new(None),
                cache: None,
            }),
        }
    }

    /// Create a store backed by a durable cache, reloading any persisted
    /// session at startup.
    pub fn with_cache(cache: Box<dyn SessionCache>) -> Result<Self, StorageError> {
        let existing = cache.load()?;
        if existing.is_some() {
            debug!("restored persisted session");
        }
        Ok(Self {
            inner: Arc::new(StoreInner {
                session: RwLock::new(existing),
                cache: Some(cache),
            }),
        })
    }

    /// Returns the current credential, if a session exists.
    pub fn credential(&self) -> Option<Credential> {
        let guard = self.inner.session.read().unwrap();
        guard.as_ref().map(|s| s.credential.clone())
    }

    /// Returns a snapshot of the current session, if any.
    pub fn session(&self) -> Option<Session> {
        let guard = self.inner.session.read().unwrap();
        guard.clone()
    }

    /// Replace the current session.
    ///
    /// The durable copy is written under the same write lock as the
    /// in-memory copy; if persistence fails, the in-memory value is left
    /// unchanged.
    pub fn set(&self, session: Session) -> Result<(), StorageError> {
        let mut guard = self.inner.session.write().unwrap();
        if let Some(cache) = &self.inner.cache {
            cache.store(&session)?;
        }
        *guard = Some(session);
        Ok(())
    }

    /// Drop the current session and its durable copy. Idempotent.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self.inner.session.write().unwrap();
        if let Some(cache) = &self.inner.cache {
            cache.clear()?;
        }
        *guard = None;
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let guard = self.inner.session.read().unwrap();
        f.debug_struct("SessionStore")
            .field("authenticated", &guard.is_some())
            .finish()
    }
}

/// On-disk session format.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    user: User,
    credential: String,
    created_at: DateTime<Utc>,
}

/// File-backed session cache.
///
/// Stores the session as JSON with restrictive permissions (Unix only).
pub struct FileSessionCache {
    path: PathBuf,
}

impl FileSessionCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionCache for FileSessionCache {
    fn store(&self, session: &Session) -> Result<(), StorageError> {
        let stored = StoredSession {
            user: session.user.clone(),
            credential: session.credential.as_str().to_string(),
            created_at: session.created_at,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&stored)?;
        fs::write(&self.path, &json)?;

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }

    fn load(&self) -> Result<Option<Session>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        let stored: StoredSession = serde_json::from_str(&json)?;

        Ok(Some(Session {
            user: stored.user,
            credential: Credential::new(stored.credential),
            created_at: stored.created_at,
        }))
    }

    fn clear(&self) -> Result<(), StorageError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
