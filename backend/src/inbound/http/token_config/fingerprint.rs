//! Token secret fingerprinting for operational visibility.
//!
//! A truncated SHA-256 of the secret lets operators confirm which secret is
//! active without exposing it. The fingerprint is logged at startup.

use sha2::{Digest, Sha256};

use crate::domain::TokenSecret;

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the secret's SHA-256 hash as 16 lowercase hex digits.
///
/// # Examples
///
/// ```rust
/// use content_api::domain::TokenSecret;
/// use content_api::inbound::http::token_config::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(&TokenSecret::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &TokenSecret) -> String {
    let digest = Sha256::digest(secret.expose());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn fingerprint_is_deterministic() {
        let secret = TokenSecret::from_bytes(vec![b'a'; 32]);
        assert_eq!(secret_fingerprint(&secret), secret_fingerprint(&secret));
    }

    #[rstest]
    fn fingerprint_is_lowercase_hex_of_expected_length() {
        let fp = secret_fingerprint(&TokenSecret::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert_eq!(fp, fp.to_lowercase());
    }

    #[rstest]
    fn different_secrets_produce_different_fingerprints() {
        let a = TokenSecret::from_bytes(vec![b'a'; 32]);
        let b = TokenSecret::from_bytes(vec![b'b'; 32]);
        assert_ne!(secret_fingerprint(&a), secret_fingerprint(&b));
    }
}
