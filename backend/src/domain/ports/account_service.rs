//! Driving port for registration and login.
//!
//! Inbound adapters call this port with the raw username from the request;
//! validation and persistence stay behind it.

use async_trait::async_trait;

use crate::domain::{Error, SessionToken, User};

/// Account use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Register a new user under the trimmed `username`.
    async fn register(&self, username: &str) -> Result<User, Error>;

    /// Issue a session token for an existing `username`.
    async fn login(&self, username: &str) -> Result<SessionToken, Error>;
}
