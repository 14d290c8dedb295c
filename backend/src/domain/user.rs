//! User identity model.
//!
//! Users are created by registration and never change afterwards. Identity
//! is established by username alone.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a username, in characters.
pub const USERNAME_MAX: usize = 80;

/// Validation errors for user identity values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The user id is not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The username is missing or blank.
    #[error("username must not be empty")]
    EmptyUsername,
    /// The username exceeds [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
}

/// Opaque, stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its textual UUID form.
    ///
    /// # Examples
    /// ```
    /// use content_api::domain::UserId;
    ///
    /// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
    /// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique login name, stored trimmed.
///
/// ## Invariants
/// - non-empty after trimming
/// - at most [`USERNAME_MAX`] characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Trim and validate a username.
    ///
    /// # Examples
    /// ```
    /// use content_api::domain::Username;
    ///
    /// let name = Username::new("  alice ").expect("valid username");
    /// assert_eq!(name.as_ref(), "alice");
    /// assert!(Username::new("   ").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if trimmed.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub const fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }

    /// The user's identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// The user's login name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }
}
