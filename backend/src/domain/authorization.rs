//! Authorization gate resolving bearer tokens to users.
//!
//! Clients only ever see two messages: one for an absent token and one for
//! everything else (bad signature, expiry, unknown subject). The concrete
//! reason is logged at debug level.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::persistence_errors::map_user_persistence_error;
use super::ports::{RequestAuthorizer, UserRepository};
use super::{Error, TokenService, User};

/// Message returned when no bearer token was presented.
pub const TOKEN_MISSING_MESSAGE: &str = "Token is missing!";
/// Message returned for any token that does not resolve to a user.
pub const TOKEN_INVALID_MESSAGE: &str = "Token is invalid!";

/// [`RequestAuthorizer`] verifying tokens and resolving their subject.
#[derive(Clone)]
pub struct AuthorizationGate {
    tokens: Arc<TokenService>,
    users: Arc<dyn UserRepository>,
}

impl AuthorizationGate {
    /// Create a gate.
    pub fn new(tokens: Arc<TokenService>, users: Arc<dyn UserRepository>) -> Self {
        Self { tokens, users }
    }
}

#[async_trait]
impl RequestAuthorizer for AuthorizationGate {
    async fn authorize(&self, bearer: Option<String>) -> Result<User, Error> {
        let Some(token) = bearer else {
            debug!("request rejected: no bearer token");
            return Err(Error::unauthorized(TOKEN_MISSING_MESSAGE));
        };

        let user_id = self.tokens.verify(&token).map_err(|reason| {
            debug!(%reason, "request rejected: bearer token failed verification");
            Error::unauthorized(TOKEN_INVALID_MESSAGE)
        })?;

        self.users
            .find_by_id(&user_id)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| {
                debug!(%user_id, "request rejected: token subject does not exist");
                Error::unauthorized(TOKEN_INVALID_MESSAGE)
            })
    }
}
