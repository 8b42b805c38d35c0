//! The authenticated session value.

use chrono::{DateTime, Utc};

use crate::endpoints::User;

use super::token::Credential;

/// An authenticated session: user identity plus the bearer credential.
///
/// Created on successful login or silent re-authentication; destroyed on
/// logout or unrecoverable refresh failure. The session store owns the
/// current instance and keeps its durable copy consistent on every mutation.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub credential: Credential,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(user: User, credential: Credential) -> Self {
        Self {
            user,
            credential,
            created_at: Utc::now(),
        }
    }
}
