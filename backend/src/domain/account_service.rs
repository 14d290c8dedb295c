//! Registration and login.
//!
//! Identity is the username alone: registering claims a name, logging in
//! with a registered name yields a session token.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use super::persistence_errors::{USERNAME_TAKEN_MESSAGE, map_user_persistence_error};
use super::ports::{AccountService, UserRepository};
use super::{Error, SessionToken, TokenService, User, UserId, UserValidationError, Username};

const USERNAME_REQUIRED_MESSAGE: &str = "Username is required";
const INVALID_USERNAME_MESSAGE: &str = "Invalid username";

/// [`AccountService`] backed by a [`UserRepository`] and a [`TokenService`].
#[derive(Clone)]
pub struct UserAccountService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl UserAccountService {
    /// Create the service.
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }
}

fn map_registration_validation(err: UserValidationError) -> Error {
    match err {
        UserValidationError::EmptyUsername => Error::invalid_request(USERNAME_REQUIRED_MESSAGE),
        other => Error::invalid_request(other.to_string()),
    }
}

#[async_trait]
impl AccountService for UserAccountService {
    async fn register(&self, username: &str) -> Result<User, Error> {
        let username = Username::new(username).map_err(map_registration_validation)?;
        let existing = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?;
        if existing.is_some() {
            return Err(Error::invalid_request(USERNAME_TAKEN_MESSAGE));
        }

        let user = User::new(UserId::random(), username);
        // The repository enforces uniqueness too; a concurrent registration
        // surfaces as DuplicateUsername and maps to the same message.
        self.users
            .create(&user)
            .await
            .map_err(map_user_persistence_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn login(&self, username: &str) -> Result<SessionToken, Error> {
        let Ok(username) = Username::new(username) else {
            debug!("login rejected: blank or oversized username");
            return Err(Error::unauthorized(INVALID_USERNAME_MESSAGE));
        };
        let user = self
            .users
            .find_by_username(&username)
            .await
            .map_err(map_user_persistence_error)?
            .ok_or_else(|| {
                debug!("login rejected: unknown username");
                Error::unauthorized(INVALID_USERNAME_MESSAGE)
            })?;

        self.tokens.issue(user.id()).map_err(|err| {
            error!(error = %err, "failed to issue session token");
            Error::internal(err.to_string())
        })
    }
}
