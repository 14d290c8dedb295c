//! Token signing secret configuration.
//!
//! The HS256 secret is read from a file named by `TOKEN_SECRET_FILE`
//! (default `/var/run/secrets/token_secret`). Debug builds fall back to an
//! ephemeral random secret when the file is unreadable; release builds
//! require a readable file of at least 32 bytes and refuse
//! `TOKEN_ALLOW_EPHEMERAL=1`.

pub mod fingerprint;

use std::path::PathBuf;

use mockable::Env;
use tracing::{debug, warn};
use zeroize::Zeroize;

use crate::domain::TokenSecret;

const TOKEN_SECRET_DEFAULT_PATH: &str = "/var/run/secrets/token_secret";
const TOKEN_SECRET_MIN_LEN: usize = 32;
const SECRET_FILE_ENV: &str = "TOKEN_SECRET_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "TOKEN_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate missing secrets and emit warnings.
    Debug,
    /// Release builds require a real secret file.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use content_api::inbound::http::token_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while loading the token secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenConfigError {
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the secret file failed.
    #[error("failed to read token secret at {path}: {source}")]
    SecretRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The secret file is too short for release builds.
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not use ephemeral secrets.
    #[error("TOKEN_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Load the token signing secret from the environment.
///
/// # Examples
///
/// ```rust
/// use content_api::inbound::http::token_config::{BuildMode, token_secret_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path = std::env::temp_dir().join("token_secret_example");
/// std::fs::write(&path, vec![b'k'; 32])?;
///
/// let path_str = path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "TOKEN_SECRET_FILE" => Some(path_str.clone()),
///     _ => None,
/// });
///
/// let secret = token_secret_from_env(&env, BuildMode::Release)?;
/// assert_eq!(secret.len(), 32);
///
/// std::fs::remove_file(&path)?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// Returns [`TokenConfigError`] when release requirements are not met or an
/// environment value is malformed in a release build.
pub fn token_secret_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSecret, TokenConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let path = PathBuf::from(
        env.string(SECRET_FILE_ENV)
            .unwrap_or_else(|| TOKEN_SECRET_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if mode == BuildMode::Release && length < TOKEN_SECRET_MIN_LEN {
                bytes.zeroize();
                return Err(TokenConfigError::SecretTooShort {
                    path,
                    length,
                    min_len: TOKEN_SECRET_MIN_LEN,
                });
            }
            if bytes.is_empty() {
                warn!(path = %path.display(), "token secret file is empty; using temporary secret (dev only)");
                return Ok(TokenSecret::generate());
            }
            Ok(TokenSecret::from_bytes(bytes))
        }
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using temporary token secret (dev only)"
                );
                Ok(TokenSecret::generate())
            } else {
                Err(TokenConfigError::SecretRead {
                    path,
                    source: error,
                })
            }
        }
    }
}

fn allow_ephemeral_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<bool, TokenConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        debug!("TOKEN_ALLOW_EPHEMERAL not set; defaulting to disabled");
        return Ok(false);
    };

    match parse_bool(&value) {
        Some(true) if mode.is_debug() => Ok(true),
        Some(true) => Err(TokenConfigError::EphemeralNotAllowed),
        Some(false) => Ok(false),
        None if mode.is_debug() => {
            warn!(value = %value, "invalid TOKEN_ALLOW_EPHEMERAL; defaulting to disabled");
            Ok(false)
        }
        None => Err(TokenConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
