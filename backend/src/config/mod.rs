//! Process-wide identity configuration loaded once at startup.
//!
//! Tunables come from [`IdentitySettings`] via OrthoConfig (environment
//! prefix `IDENTITY`). The token signing secret is loaded separately by
//! [`signing_key_from_env`] because it follows a build-mode policy.

use std::num::NonZeroUsize;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

pub mod signing_key;

pub use signing_key::{BuildMode, SigningKey, SigningKeyConfigError, signing_key_from_env};

/// Tunables for the identity adapters.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "IDENTITY")]
pub struct IdentitySettings {
    /// Token lifetime in seconds. Zero means tokens never expire.
    #[ortho_config(default = 0)]
    pub token_ttl_secs: u64,
    /// Maximum number of concurrent hash or verify jobs.
    pub hash_workers: Option<usize>,
}

impl IdentitySettings {
    /// Configured token lifetime, if any.
    pub fn token_ttl(&self) -> Option<Duration> {
        (self.token_ttl_secs > 0).then(|| Duration::from_secs(self.token_ttl_secs))
    }

    /// Configured hash worker count, falling back to available parallelism.
    pub fn hash_workers(&self) -> NonZeroUsize {
        self.hash_workers
            .and_then(NonZeroUsize::new)
            .or_else(|| std::thread::available_parallelism().ok())
            .unwrap_or(NonZeroUsize::MIN)
    }
}
