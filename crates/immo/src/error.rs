//! Error types for the immo client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, domain, and protocol failures, so callers can
//! tell a dead network apart from a rejected session or a backend-reported
//! business error.

use std::fmt;
use thiserror::Error;

/// The unified error type for immo operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Domain errors reported by the backend envelope (`status: "Failed"`).
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Protocol errors (unexpected HTTP statuses, malformed envelopes).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Session cache errors (durable storage I/O or format).
    #[error("session storage error: {0}")]
    Storage(#[from] StorageError),

    /// Request body serialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Input validation errors (malformed base URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidUrlError),
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP transport error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials provided at login.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The backend rejected the current credential as expired.
    #[error("session expired")]
    SessionExpired,

    /// No credential is stored for a protected request.
    #[error("no credential stored")]
    MissingCredential,

    /// Silent re-authentication itself failed; the session has been ended.
    #[error("re-authentication failed")]
    ReauthenticationFailed,
}

/// A business failure reported inside a response envelope.
///
/// Distinct from a transport failure: the HTTP exchange succeeded, but the
/// backend declined the operation and said why.
#[derive(Debug, Clone)]
pub struct DomainError {
    /// Human-readable message from the backend.
    pub message: String,
    /// Machine-readable error code, if the backend supplied one.
    pub code: Option<String>,
    /// Additional error detail lines.
    pub errors: Vec<String>,
}

impl DomainError {
    pub fn new(message: impl Into<String>, code: Option<String>, errors: Vec<String>) -> Self {
        Self {
            message: message.into(),
            code,
            errors,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        Ok(())
    }
}

impl std::error::Error for DomainError {}

/// Protocol-level errors: the backend answered with something outside the
/// envelope contract.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Server-supplied error code, if present.
    pub code: Option<String>,
    /// Error message from the server, if present.
    pub message: Option<String>,
}

impl ProtocolError {
    pub fn new(status: u16, code: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            code,
            message,
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

/// Durable session cache errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the cache file failed.
    #[error("cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The cached session could not be encoded or decoded.
    #[error("cache format invalid: {0}")]
    Format(#[from] serde_json::Error),
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidUrlError {
    /// The API base URL is malformed or uses a disallowed scheme.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },
}
