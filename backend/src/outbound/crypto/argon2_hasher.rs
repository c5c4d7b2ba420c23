//! Argon2id implementation of the `PasswordHasher` port.
//!
//! Hashing is CPU-bound, so every job runs on Tokio's blocking pool. A
//! semaphore caps the number of jobs in flight at the configured worker
//! count; further callers wait for a permit instead of queueing unbounded
//! work behind the blocking pool.

use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, SaltString};
use argon2::{Algorithm, Argon2, Params, PasswordHasher as _, PasswordVerifier, Version};
use async_trait::async_trait;
use tokio::sync::Semaphore;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{HashedPassword, Password};

/// Argon2id (v0x13) hasher producing PHC strings.
#[derive(Clone)]
pub struct Argon2PasswordHasher {
    argon2: Argon2<'static>,
    permits: Arc<Semaphore>,
    workers: usize,
}

impl Argon2PasswordHasher {
    /// Hasher with the library's recommended cost parameters.
    pub fn new(workers: NonZeroUsize) -> Self {
        Self::with_params(Params::default(), workers)
    }

    /// Hasher with explicit cost parameters.
    ///
    /// Stored hashes carry their own parameters, so changing them only
    /// affects new hashes.
    pub fn with_params(params: Params, workers: NonZeroUsize) -> Self {
        let workers = workers.get();
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            permits: Arc::new(Semaphore::new(workers)),
            workers,
        }
    }

    /// Maximum number of concurrent hash or verify jobs.
    pub fn workers(&self) -> usize {
        self.workers
    }

    async fn run<F, O>(&self, job: F) -> Result<O, PasswordHashError>
    where
        F: FnOnce(&Argon2<'static>) -> O + Send + 'static,
        O: Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| PasswordHashError::unavailable("hash worker pool closed"))?;
        let argon2 = self.argon2.clone();
        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job(&argon2)
        })
        .await
        .map_err(|err| PasswordHashError::unavailable(err.to_string()))
    }
}

impl fmt::Debug for Argon2PasswordHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2PasswordHasher")
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, plaintext: &Password) -> Result<HashedPassword, PasswordHashError> {
        let plaintext = Zeroizing::new(plaintext.expose().to_owned());
        self.run(move |argon2| {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(plaintext.as_bytes(), &salt)
                .map(|hash| HashedPassword::new(hash.to_string()))
                .map_err(|err| PasswordHashError::hashing(err.to_string()))
        })
        .await?
    }

    async fn verify(&self, plaintext: &Password, hash: &HashedPassword) -> bool {
        let plaintext = Zeroizing::new(plaintext.expose().to_owned());
        let encoded = hash.as_str().to_owned();
        let outcome = self
            .run(move |argon2| match PasswordHash::new(&encoded) {
                Ok(parsed) => argon2
                    .verify_password(plaintext.as_bytes(), &parsed)
                    .is_ok(),
                Err(_) => false,
            })
            .await;
        outcome.unwrap_or_else(|error| {
            warn!(%error, "password verification could not run");
            false
        })
    }
}
