//! Signed bearer tokens binding a request to a user.
//!
//! Tokens are HS256 JWTs carrying the user id and an expiry timestamp. They
//! are never stored and cannot be revoked; a token stops working once the
//! injected clock reaches its `exp`. Verification is a pure function of the
//! token, the clock reading and the signing secret.

use std::fmt;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

use super::UserId;

/// Lifetime of an issued token.
pub const SESSION_TTL: Duration = Duration::hours(24);

/// Length of a generated ephemeral secret, in bytes.
const EPHEMERAL_SECRET_LEN: usize = 32;

/// HMAC signing secret. Wiped from memory on drop.
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    /// Take ownership of secret bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Generate a random secret for development use.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Raw key material.
    #[must_use]
    pub fn expose(&self) -> &[u8] {
        &self.0
    }

    /// Secret length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the secret has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSecret")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// An issued bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap already-encoded token text.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token text as sent in the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token and return its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Reasons a token cannot be issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenIssueError {
    /// The signer rejected the claims or key.
    #[error("failed to sign session token: {message}")]
    Signing {
        /// Underlying signer message.
        message: String,
    },
}

/// Reasons a presented token is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenVerificationError {
    /// The token does not parse, its signature does not match, or its claims
    /// are not the expected shape.
    #[error("token is malformed or its signature does not match")]
    Malformed,
    /// The token's expiry has been reached.
    #[error("token has expired")]
    Expired,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: Uuid,
    exp: i64,
}

/// Issues and verifies session tokens.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use content_api::domain::{TokenSecret, TokenService, UserId};
/// use mockable::DefaultClock;
///
/// let secret = TokenSecret::from_bytes(b"an example secret of adequate size!".to_vec());
/// let tokens = TokenService::new(&secret, Arc::new(DefaultClock));
/// let user = UserId::random();
/// let token = tokens.issue(&user).expect("issue token");
/// assert_eq!(tokens.verify(token.as_str()), Ok(user));
/// ```
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Build a service signing with `secret` and reading time from `clock`.
    #[must_use]
    pub fn new(secret: &TokenSecret, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against the injected clock in `verify`.
        validation.validate_exp = false;
        Self {
            encoding: EncodingKey::from_secret(secret.expose()),
            decoding: DecodingKey::from_secret(secret.expose()),
            validation,
            clock,
        }
    }

    /// Sign a token for `user_id` expiring [`SESSION_TTL`] from now.
    ///
    /// # Errors
    /// Returns [`TokenIssueError::Signing`] if the signer fails.
    pub fn issue(&self, user_id: &UserId) -> Result<SessionToken, TokenIssueError> {
        let expires_at = self.clock.utc() + SESSION_TTL;
        let claims = Claims {
            user_id: *user_id.as_uuid(),
            exp: expires_at.timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(SessionToken)
            .map_err(|err| TokenIssueError::Signing {
                message: err.to_string(),
            })
    }

    /// Check the signature and expiry of `token` and return its subject.
    ///
    /// # Errors
    /// [`TokenVerificationError::Malformed`] for undecodable or forged
    /// tokens; [`TokenVerificationError::Expired`] once `now >= exp`.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenVerificationError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| TokenVerificationError::Malformed)?;
        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenVerificationError::Expired);
        }
        Ok(UserId::from_uuid(data.claims.user_id))
    }
}

#[cfg(test)]
mod tests {
    //! Issue/verify behaviour against a controllable clock.
    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::MutableClock;

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        Arc::new(MutableClock::fixed())
    }

    fn service(secret: &[u8], clock: Arc<MutableClock>) -> TokenService {
        TokenService::new(&TokenSecret::from_bytes(secret.to_vec()), clock)
    }

    #[rstest]
    fn verify_returns_issued_subject(clock: Arc<MutableClock>) {
        let tokens = service(b"0123456789abcdef0123456789abcdef", clock);
        let user = UserId::random();
        let token = tokens.issue(&user).expect("issue token");
        assert_eq!(tokens.verify(token.as_str()), Ok(user));
    }

    #[rstest]
    fn token_is_valid_until_just_before_expiry(clock: Arc<MutableClock>) {
        let tokens = service(b"0123456789abcdef0123456789abcdef", Arc::clone(&clock));
        let user = UserId::random();
        let token = tokens.issue(&user).expect("issue token");

        clock.advance(SESSION_TTL - Duration::seconds(1));
        assert_eq!(tokens.verify(token.as_str()), Ok(user));

        clock.advance(Duration::seconds(1));
        assert_eq!(
            tokens.verify(token.as_str()),
            Err(TokenVerificationError::Expired)
        );
    }

    #[rstest]
    fn token_signed_with_other_secret_is_malformed(clock: Arc<MutableClock>) {
        let issuer = service(b"first-secret-first-secret-first-", Arc::clone(&clock));
        let verifier = service(b"other-secret-other-secret-other-", clock);
        let token = issuer.issue(&UserId::random()).expect("issue token");
        assert_eq!(
            verifier.verify(token.as_str()),
            Err(TokenVerificationError::Malformed)
        );
    }

    #[rstest]
    #[case("")]
    #[case("garbage")]
    #[case("a.b.c")]
    fn undecodable_tokens_are_malformed(clock: Arc<MutableClock>, #[case] token: &str) {
        let tokens = service(b"0123456789abcdef0123456789abcdef", clock);
        assert_eq!(tokens.verify(token), Err(TokenVerificationError::Malformed));
    }

    #[rstest]
    fn tampered_payload_is_malformed(clock: Arc<MutableClock>) {
        let tokens = service(b"0123456789abcdef0123456789abcdef", clock);
        let token = tokens.issue(&UserId::random()).expect("issue token");
        let other = tokens.issue(&UserId::random()).expect("issue token");

        let mut parts: Vec<&str> = token.as_str().split('.').collect();
        let other_parts: Vec<&str> = other.as_str().split('.').collect();
        parts[1] = other_parts[1];
        let forged = parts.join(".");

        assert_eq!(tokens.verify(&forged), Err(TokenVerificationError::Malformed));
    }

    #[rstest]
    fn secret_debug_output_hides_bytes() {
        let secret = TokenSecret::from_bytes(b"super-secret".to_vec());
        let rendered = format!("{secret:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("len"));
    }

    #[rstest]
    fn generated_secrets_differ() {
        let first = TokenSecret::generate();
        let second = TokenSecret::generate();
        assert_eq!(first.len(), EPHEMERAL_SECRET_LEN);
        assert_ne!(first.expose(), second.expose());
    }
}
