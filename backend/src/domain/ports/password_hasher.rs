//! Port abstraction for one-way password hashing.
use async_trait::async_trait;

use crate::domain::{HashedPassword, Password};

use super::define_port_error;

define_port_error! {
    /// Errors raised while producing a password hash.
    pub enum PasswordHashError {
        /// The hashing primitive rejected its input or parameters.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The worker pool could not run the job.
        Unavailable { message: String } => "password hashing unavailable: {message}",
    }
}

/// Salted, deliberately slow password hashing.
///
/// Implementations are CPU-bound; adapters run the work off the async
/// executor so request handling is not starved.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `plaintext` with a fresh random salt.
    ///
    /// Hashing the same password twice yields different encodings that both
    /// verify.
    async fn hash(&self, plaintext: &Password) -> Result<HashedPassword, PasswordHashError>;

    /// Check `plaintext` against a stored hash.
    ///
    /// Returns `false` for a mismatch and for a hash that cannot be parsed.
    async fn verify(&self, plaintext: &Password, hash: &HashedPassword) -> bool;
}
