//! The request pipeline.
//!
//! Orchestrates, per outgoing call: skip-list classification, credential
//! attachment, send, failure policy (refresh and replay at most once), and
//! envelope normalization. Callers stay unaware of the recovery machinery:
//! they see the eventual outcome of their request and nothing else.

use std::sync::Arc;

use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::auth::{Credentials, Session, SessionManager, SessionStore};
use crate::envelope::{Envelope, Status};
use crate::error::{AuthError, DomainError, Error, ProtocolError};
use crate::http::HttpClient;
use crate::notify::{LogNotifier, Notifier};
use crate::refresh::{RefreshCoordinator, RefreshFailed};
use crate::request::{RequestDescriptor, is_public_path};
use crate::types::ApiUrl;

/// Authenticated API client.
///
/// Clone is cheap: clones share the session store, the refresh coordinator,
/// and the underlying connection pool, so concurrent callers collapse into a
/// single refresh when their session expires.
///
/// # Example
///
/// ```no_run
/// use immo::{ApiClient, ApiUrl, Credentials};
///
/// # async fn example() -> Result<(), immo::Error> {
/// let client = ApiClient::new(ApiUrl::new("https://api.immo.app")?)?;
/// client.login(Credentials::new("alice@example.com", "secret")).await?;
///
/// let properties: serde_json::Value = client.get("/api/property/list").await?;
/// println!("{properties}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ApiClient {
    http: HttpClient,
    store: SessionStore,
    manager: SessionManager,
    coordinator: Arc<RefreshCoordinator>,
    notifier: Arc<dyn Notifier>,
}

impl ApiClient {
    /// Create a client with an in-memory session store and the default
    /// logging notifier.
    pub fn new(base: ApiUrl) -> Result<Self, Error> {
        Self::with_parts(base, SessionStore::in_memory(), Arc::new(LogNotifier))
    }

    /// Create a client with an explicit session store and notifier.
    pub fn with_parts(
        base: ApiUrl,
        store: SessionStore,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, Error> {
        let http = HttpClient::new(base)?;
        let manager = SessionManager::new(http.clone(), store.clone(), Arc::clone(&notifier));
        Ok(Self {
            http,
            store,
            manager,
            coordinator: Arc::new(RefreshCoordinator::new()),
            notifier,
        })
    }

    /// The session store shared by this client and its clones.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Authenticate and start a session.
    pub async fn login(&self, credentials: Credentials) -> Result<Session, Error> {
        self.manager.login(credentials).await
    }

    /// End the current session. Idempotent.
    pub fn logout(&self) -> Result<(), Error> {
        self.manager.logout()
    }

    /// Authenticated GET returning the envelope payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.send(RequestDescriptor::get(path)).await
    }

    /// Authenticated POST returning the envelope payload.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let body = serde_json::to_value(body)?;
        self.send(RequestDescriptor::post(path, body)).await
    }

    /// Send a descriptor through the full pipeline and normalize the result.
    pub async fn send<T: DeserializeOwned>(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<T, Error> {
        let response = self.dispatch(descriptor).await?;
        self.normalize(response).await
    }

    /// Send a descriptor, applying the failure policy.
    ///
    /// Skip-listed paths bypass credential attachment and refresh entirely.
    /// A missing credential triggers a refresh before the first send; an
    /// unauthorized response on an unmarked descriptor triggers a refresh
    /// followed by a single marked replay. A marked descriptor never
    /// triggers another refresh.
    #[instrument(skip(self, descriptor), fields(method = %descriptor.method, path = %descriptor.path))]
    async fn dispatch(&self, descriptor: RequestDescriptor) -> Result<reqwest::Response, Error> {
        if is_public_path(&descriptor.path) {
            return self.http.execute(&descriptor, None).await;
        }

        let (descriptor, credential) = match self.store.credential() {
            Some(credential) => (descriptor, credential),
            None => {
                // Refresh before wasting a send that is doomed to 401.
                debug!("no credential stored, refreshing before send");
                match self.coordinator.request_refresh(&self.manager).await {
                    // Mark the send so a stale 401 cannot loop back here.
                    Ok(credential) => (descriptor.into_replay(), credential),
                    Err(RefreshFailed) => return Err(AuthError::MissingCredential.into()),
                }
            }
        };

        let response = self.http.execute(&descriptor, Some(&credential)).await?;
        if response.status() != StatusCode::UNAUTHORIZED || descriptor.is_retry() {
            return Ok(response);
        }

        debug!("unauthorized response, refreshing credential");
        match self.coordinator.request_refresh(&self.manager).await {
            Ok(fresh) => {
                let replay = descriptor.into_replay();
                self.http.execute(&replay, Some(&fresh)).await
            }
            // The session is already torn down; surface the failure the
            // caller actually observed.
            Err(RefreshFailed) => Err(AuthError::SessionExpired.into()),
        }
    }

    /// Classify a settled response and unwrap its envelope.
    async fn normalize<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, Error> {
        let status = response.status();

        if status.is_success() {
            let envelope: Envelope<T> = response.json().await?;
            return envelope.normalize(self.notifier.as_ref());
        }

        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::SessionExpired.into());
        }

        // Non-auth failure: the body may still be a domain envelope.
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<Envelope<serde_json::Value>>(&body) {
            Ok(envelope) if envelope.status == Status::Failed => {
                let error = DomainError::new(
                    envelope
                        .message
                        .unwrap_or_else(|| "request failed".to_string()),
                    envelope.code,
                    envelope.errors,
                );
                self.notifier.notify(&error);
                Err(error.into())
            }
            _ => Err(ProtocolError::new(status.as_u16(), None, None).into()),
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", self.http.base())
            .field("store", &self.store)
            .finish()
    }
}
