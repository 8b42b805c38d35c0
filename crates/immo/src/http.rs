//! Low-level HTTP transport.
//!
//! Serializes request descriptors onto the wire. This is the only place the
//! replay marker becomes a header and the credential becomes an
//! `Authorization` value; everything above works with descriptors.

use std::time::Duration;

use tracing::trace;

use crate::auth::Credential;
use crate::error::Error;
use crate::request::{RETRY_ATTEMPT_HEADER, RequestDescriptor};
use crate::types::ApiUrl;

/// HTTP request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Thin wrapper over `reqwest::Client` bound to an API base URL.
///
/// Clone is cheap; the underlying client shares its connection pool.
#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: reqwest::Client,
    base: ApiUrl,
}

impl HttpClient {
    pub(crate) fn new(base: ApiUrl) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("immo/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, base })
    }

    pub(crate) fn base(&self) -> &ApiUrl {
        &self.base
    }

    /// Send a descriptor, attaching the credential if one is given.
    ///
    /// The descriptor is read-only here: headers are copied onto a fresh wire
    /// request, so a later replay of the same descriptor starts clean.
    pub(crate) async fn execute(
        &self,
        descriptor: &RequestDescriptor,
        credential: Option<&Credential>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.base.endpoint(&descriptor.path);
        trace!(method = %descriptor.method, %url, retry = descriptor.is_retry(), "sending request");

        let mut request = self
            .client
            .request(descriptor.method.clone(), &url)
            .headers(descriptor.headers.clone());

        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }
        if let Some(credential) = credential {
            request = request.bearer_auth(credential.as_str());
        }
        if descriptor.is_retry() {
            request = request.header(RETRY_ATTEMPT_HEADER, "1");
        }

        Ok(request.send().await?)
    }
}
