//! Mutex-guarded `UserRepository`.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, Username};

/// In-memory [`UserRepository`] keyed by user id.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_users<R>(
        &self,
        f: impl FnOnce(&mut HashMap<UserId, User>) -> R,
    ) -> Result<R, UserPersistenceError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|_| UserPersistenceError::query("user store poisoned"))?;
        Ok(f(&mut guard))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError> {
        self.with_users(|users| {
            if users.values().any(|u| u.username() == user.username()) {
                return Err(UserPersistenceError::duplicate_username(
                    user.username().as_ref(),
                ));
            }
            users.insert(*user.id(), user.clone());
            Ok(())
        })?
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        self.with_users(|users| users.get(id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        self.with_users(|users| users.values().find(|u| u.username() == username).cloned())
    }
}
