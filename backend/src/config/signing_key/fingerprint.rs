//! Signing key fingerprinting for operational visibility.
//!
//! Operators compare fingerprints across hosts to confirm which token key is
//! active; the key itself never leaves the process.

use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 digest of `key`, as 16 lowercase hex chars.
///
/// # Examples
///
/// ```rust
/// use podcast_identity::config::signing_key::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&[7_u8; 32]);
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &[u8]) -> String {
    let digest = Sha256::digest(key);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
