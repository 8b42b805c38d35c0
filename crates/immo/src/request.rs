//! Request descriptors and the public-path skip-list.

use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::endpoints::{SIGN_IN, SIGN_IN_WITH_TOKEN};

/// Header serialized onto the single permitted replay of a request, so the
/// "never retry twice" invariant is observable at the wire level.
pub const RETRY_ATTEMPT_HEADER: &str = "x-retry-attempt";

/// Paths exempt from credential attachment and refresh handling.
///
/// Matched as case-insensitive substrings. The sign-in endpoints are listed
/// to prevent a failed re-authentication from recursing into another refresh.
const PUBLIC_PATHS: &[&str] = &[
    "/assets/",
    "/public/",
    "/forgot-password",
    "/reset-password",
    SIGN_IN,
    SIGN_IN_WITH_TOKEN,
];

/// Returns true if the path is skip-listed: no credential is attached and an
/// unauthorized response never triggers a refresh.
pub fn is_public_path(path: &str) -> bool {
    let path = path.to_ascii_lowercase();
    PUBLIC_PATHS.iter().any(|p| path.contains(p))
}

/// An outgoing request, described independently of the wire.
///
/// The descriptor is what the pipeline replays after a credential refresh; it
/// is never mutated in place, so a replay re-attaches the fresh credential to
/// a clean copy. The replay marker is an explicit field here and becomes the
/// [`RETRY_ATTEMPT_HEADER`] only when the request is serialized.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path and query relative to the API base URL. Must start with `/`.
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
    retried: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
            retried: false,
        }
    }

    /// Describe a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Describe a POST request with a JSON body.
    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        let mut descriptor = Self::new(Method::POST, path);
        descriptor.body = Some(body);
        descriptor
    }

    /// Add a header to the descriptor.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Whether this descriptor has already been replayed once.
    pub fn is_retry(&self) -> bool {
        self.retried
    }

    /// Clone this descriptor for its single permitted replay.
    ///
    /// A descriptor carrying the marker is never replayed again.
    pub fn into_replay(mut self) -> Self {
        self.retried = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_assets_are_public() {
        assert!(is_public_path("/assets/logo.svg"));
        assert!(is_public_path("/public/listings/42"));
    }

    #[test]
    fn password_flows_are_public() {
        assert!(is_public_path("/api/user/forgot-password"));
        assert!(is_public_path("/api/user/reset-password?token=abc"));
    }

    #[test]
    fn sign_in_endpoints_are_public() {
        assert!(is_public_path("/api/user/sign-in"));
        assert!(is_public_path("/api/user/sign-in-with-token"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(is_public_path("/Assets/Logo.svg"));
        assert!(is_public_path("/API/User/Sign-In"));
    }

    #[test]
    fn protected_paths_are_not_public() {
        assert!(!is_public_path("/api/property/list"));
        assert!(!is_public_path("/api/maintenance/7"));
    }

    #[test]
    fn replay_sets_the_marker() {
        let descriptor = RequestDescriptor::get("/api/property/list");
        assert!(!descriptor.is_retry());

        let replay = descriptor.into_replay();
        assert!(replay.is_retry());
        assert_eq!(replay.path, "/api/property/list");
    }
}
