//! Session manager: the two operations that mint a credential, and teardown.

use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

use crate::endpoints::{SIGN_IN, SIGN_IN_WITH_TOKEN, SessionPayload, SignInRequest};
use crate::envelope::Envelope;
use crate::error::{AuthError, Error, ProtocolError};
use crate::http::HttpClient;
use crate::notify::Notifier;
use crate::request::RequestDescriptor;

use super::credentials::Credentials;
use super::session::Session;
use super::store::SessionStore;
use super::token::Credential;

/// Performs login, silent re-authentication, and logout.
///
/// The only writer of the session store. Clone is cheap; clones share the
/// store and connection pool.
#[derive(Clone)]
pub struct SessionManager {
    http: HttpClient,
    store: SessionStore,
    notifier: Arc<dyn Notifier>,
}

impl SessionManager {
    pub(crate) fn new(http: HttpClient, store: SessionStore, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            http,
            store,
            notifier,
        }
    }

    /// Authenticate with identifier and secret, writing the new session
    /// through to the store.
    #[instrument(skip(self, credentials), fields(identifier = %credentials.identifier()))]
    pub async fn login(&self, credentials: Credentials) -> Result<Session, Error> {
        info!("signing in");

        let body = serde_json::to_value(SignInRequest {
            identifier: credentials.identifier(),
            secret: credentials.secret(),
        })?;

        let payload = match self.sign_in_call(SIGN_IN, None, body).await {
            Ok(payload) => payload,
            Err(Error::Auth(AuthError::SessionExpired)) => {
                return Err(AuthError::InvalidCredentials.into());
            }
            Err(err) => return Err(err),
        };

        let session = Session::new(payload.user, Credential::new(payload.credential));
        self.store.set(session.clone())?;

        debug!("session created");
        Ok(session)
    }

    /// Silent re-authentication using the currently stored (possibly stale)
    /// credential. Used exclusively by the refresh coordinator.
    ///
    /// Any failure is terminal for the attempt and reported as
    /// [`AuthError::ReauthenticationFailed`]; the coordinator handles session
    /// teardown.
    #[instrument(skip(self))]
    pub async fn reauthenticate(&self) -> Result<Session, Error> {
        info!("re-authenticating session");

        let stale = self.store.credential();
        let payload = self
            .sign_in_call(SIGN_IN_WITH_TOKEN, stale.as_ref(), json!({}))
            .await
            .map_err(|err| {
                warn!(error = %err, "re-authentication rejected");
                Error::from(AuthError::ReauthenticationFailed)
            })?;

        let session = Session::new(payload.user, Credential::new(payload.credential));
        self.store.set(session.clone())?;

        debug!("session re-authenticated");
        Ok(session)
    }

    /// End the session and clear the store. Idempotent.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), Error> {
        if self.store.session().is_some() {
            info!("signing out");
        }
        self.store.clear()?;
        Ok(())
    }

    /// Shared transport for the two sign-in endpoints.
    async fn sign_in_call(
        &self,
        path: &str,
        credential: Option<&Credential>,
        body: serde_json::Value,
    ) -> Result<SessionPayload, Error> {
        let descriptor = RequestDescriptor::post(path, body);
        let response = self.http.execute(&descriptor, credential).await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::SessionExpired.into());
        }
        if !status.is_success() {
            return Err(ProtocolError::new(status.as_u16(), None, None).into());
        }

        let envelope: Envelope<SessionPayload> = response.json().await?;
        envelope.normalize(self.notifier.as_ref())
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("base", self.http.base())
            .finish()
    }
}
