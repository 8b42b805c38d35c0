//! Authentication types and session state.
//!
//! This module holds the session store (the single owner of the current
//! credential), the session manager that mints and tears down sessions, and
//! the credential types themselves.

mod credentials;
mod manager;
mod session;
mod store;
mod token;

pub use credentials::Credentials;
pub use manager::SessionManager;
pub use session::Session;
pub use store::{FileSessionCache, SessionCache, SessionStore};
pub use token::Credential;
