//! Mapping from persistence port failures to client-safe domain errors.
//!
//! Connection failures become `service_unavailable`; everything else is an
//! internal error whose detail is logged and later redacted by the HTTP
//! adapter.

use tracing::{error, warn};

use super::Error;
use super::ports::{ArticlePersistenceError, UserPersistenceError};

pub(crate) const USERNAME_TAKEN_MESSAGE: &str = "Username already exists";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

pub(crate) fn map_user_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::Connection { message } => {
            warn!(%message, "user repository unavailable");
            Error::service_unavailable(UNAVAILABLE_MESSAGE)
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(message)
        }
        UserPersistenceError::DuplicateUsername { .. } => {
            Error::invalid_request(USERNAME_TAKEN_MESSAGE)
        }
    }
}

pub(crate) fn map_article_persistence_error(err: ArticlePersistenceError) -> Error {
    match err {
        ArticlePersistenceError::Connection { message } => {
            warn!(%message, "article repository unavailable");
            Error::service_unavailable(UNAVAILABLE_MESSAGE)
        }
        ArticlePersistenceError::Query { message } => {
            error!(%message, "article repository query failed");
            Error::internal(message)
        }
    }
}
