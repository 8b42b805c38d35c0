//! API endpoint definitions and request/response types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Login with identifier and secret.
pub const SIGN_IN: &str = "/api/user/sign-in";

/// Silent re-authentication using the current credential.
pub const SIGN_IN_WITH_TOKEN: &str = "/api/user/sign-in-with-token";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for sign-in.
#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub identifier: &'a str,
    pub secret: &'a str,
}

/// Envelope payload from sign-in and sign-in-with-token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub user: User,
    pub credential: String,
}

/// The authenticated user identity attached to a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
