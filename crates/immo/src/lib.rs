//! immo - Client library for the Immo property-management API.
//!
//! This library provides an authenticated request pipeline with transparent
//! session recovery: outgoing calls carry the current bearer credential,
//! session-expiry failures are detected, the credential is refreshed exactly
//! once no matter how many requests fail concurrently, and the failed
//! requests are replayed once with the new credential.
//!
//! # Example
//!
//! ```no_run
//! use immo::{ApiClient, ApiUrl, Credentials};
//!
//! # async fn example() -> Result<(), immo::Error> {
//! let base = ApiUrl::new("https://api.immo.app")?;
//! let client = ApiClient::new(base)?;
//!
//! client.login(Credentials::new("alice@example.com", "app-password")).await?;
//!
//! let properties: serde_json::Value = client.get("/api/property/list").await?;
//! println!("{properties}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod envelope;
pub mod error;
mod http;
pub mod notify;
pub mod refresh;
pub mod request;
pub mod types;

// Re-export primary types at crate root for convenience
pub use auth::{Credential, Credentials, FileSessionCache, Session, SessionCache, SessionManager, SessionStore};
pub use client::ApiClient;
pub use endpoints::User;
pub use envelope::{Envelope, Status};
pub use error::{AuthError, DomainError, Error, ProtocolError, StorageError, TransportError};
pub use notify::{LogNotifier, Notifier};
pub use refresh::{RefreshCoordinator, RefreshFailed};
pub use request::RequestDescriptor;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
