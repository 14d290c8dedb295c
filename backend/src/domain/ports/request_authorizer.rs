//! Driving port resolving a bearer token to a trusted user.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Authorises requests before business logic runs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RequestAuthorizer: Send + Sync {
    /// Resolve the bearer token, if one was presented, to an existing user.
    ///
    /// Missing, invalid and expired tokens all fail with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn authorize(&self, bearer: Option<String>) -> Result<User, Error>;
}
