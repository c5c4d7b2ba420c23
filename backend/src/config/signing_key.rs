//! Token signing key loading.
//!
//! The key is read from the file named by `IDENTITY_TOKEN_KEY_FILE` once at
//! startup. Debug builds fall back to a random per-process key when the file
//! is unreadable; release builds require a readable key of at least
//! [`KEY_MIN_LEN`] bytes and an explicit `IDENTITY_ALLOW_EPHEMERAL=0`.

use std::fmt;
use std::path::PathBuf;

use mockable::Env;
use rand::RngCore;
use tracing::{info, warn};
use zeroize::Zeroizing;

pub mod fingerprint;

use fingerprint::key_fingerprint;

const KEY_DEFAULT_PATH: &str = "/var/run/secrets/identity_token_key";
/// Minimum key length accepted in release builds (the SHA-256 output size).
pub const KEY_MIN_LEN: usize = 32;
const EPHEMERAL_KEY_LEN: usize = 64;
const KEY_FILE_ENV: &str = "IDENTITY_TOKEN_KEY_FILE";
const ALLOW_EPHEMERAL_ENV: &str = "IDENTITY_ALLOW_EPHEMERAL";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Build mode used to pick the key loading policy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate a missing key file and log a warning.
    Debug,
    /// Release builds require a readable key of at least [`KEY_MIN_LEN`].
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use podcast_identity::config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
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

/// Errors raised while loading the token signing key.
#[derive(thiserror::Error, Debug)]
pub enum SigningKeyConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the key file failed.
    #[error("failed to read token key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The key file is shorter than the build mode permits.
    #[error("token key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// Release builds must not run with an ephemeral key.
    #[error("IDENTITY_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Secret used to sign and verify access tokens.
///
/// The bytes are wiped on drop and never printed; `Debug` shows the
/// fingerprint instead.
#[derive(Clone)]
pub struct SigningKey {
    bytes: Zeroizing<Vec<u8>>,
    ephemeral: bool,
}

impl SigningKey {
    /// Wrap key material loaded from a trusted source.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
            ephemeral: false,
        }
    }

    /// Random key that lives only as long as this process.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new(vec![0_u8; EPHEMERAL_KEY_LEN]);
        rand::thread_rng().fill_bytes(bytes.as_mut_slice());
        Self {
            bytes,
            ephemeral: true,
        }
    }

    /// Raw key material.
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// True when the key was generated rather than loaded.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    /// Truncated SHA-256 fingerprint safe to log.
    pub fn fingerprint(&self) -> String {
        key_fingerprint(self.as_bytes())
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("fingerprint", &self.fingerprint())
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

/// Load the token signing key according to the build-mode policy.
///
/// | Key file | Debug | Release |
/// |---|---|---|
/// | readable, >= 32 bytes | loaded | loaded |
/// | readable, shorter | loaded with a warning (empty is rejected) | `KeyTooShort` |
/// | unreadable | ephemeral key | `KeyRead`, or `EphemeralNotAllowed` when requested |
///
/// # Examples
///
/// ```rust
/// use podcast_identity::config::{signing_key_from_env, BuildMode};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("identity_token_key_example");
/// std::fs::write(&key_path, vec![b'k'; 32])?;
///
/// let key_path = key_path.to_str().expect("valid path").to_string();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "IDENTITY_TOKEN_KEY_FILE" => Some(key_path.clone()),
///     "IDENTITY_ALLOW_EPHEMERAL" => Some("0".to_string()),
///     _ => None,
/// });
///
/// let key = signing_key_from_env(&env, BuildMode::Release)?;
/// assert!(!key.is_ephemeral());
/// # Ok(())
/// # }
/// ```
pub fn signing_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SigningKey, SigningKeyConfigError> {
    let allow_ephemeral = allow_ephemeral_from_env(env, mode)?;
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| KEY_DEFAULT_PATH.to_owned()),
    );

    let key = match std::fs::read(&path) {
        Ok(bytes) => key_from_file(path, Zeroizing::new(bytes), mode)?,
        Err(error) => {
            if mode.is_debug() || allow_ephemeral {
                warn!(
                    path = %path.display(),
                    error = %error,
                    "using ephemeral token key (dev only); tokens will not survive a restart"
                );
                SigningKey::generate()
            } else {
                return Err(SigningKeyConfigError::KeyRead {
                    path,
                    source: error,
                });
            }
        }
    };

    info!(
        fingerprint = %key.fingerprint(),
        ephemeral = key.is_ephemeral(),
        "token signing key loaded"
    );
    Ok(key)
}

fn key_from_file(
    path: PathBuf,
    bytes: Zeroizing<Vec<u8>>,
    mode: BuildMode,
) -> Result<SigningKey, SigningKeyConfigError> {
    let length = bytes.len();
    if length == 0 || (mode == BuildMode::Release && length < KEY_MIN_LEN) {
        return Err(SigningKeyConfigError::KeyTooShort {
            path,
            length,
            min_len: KEY_MIN_LEN,
        });
    }
    if length < KEY_MIN_LEN {
        warn!(
            path = %path.display(),
            length,
            "token key shorter than {KEY_MIN_LEN} bytes; release builds will reject it"
        );
    }
    Ok(SigningKey {
        bytes,
        ephemeral: false,
    })
}

fn allow_ephemeral_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<bool, SigningKeyConfigError> {
    let Some(value) = env.string(ALLOW_EPHEMERAL_ENV) else {
        return if mode.is_debug() {
            Ok(false)
        } else {
            Err(SigningKeyConfigError::MissingEnv {
                name: ALLOW_EPHEMERAL_ENV,
            })
        };
    };

    match (parse_bool(&value), mode) {
        (Some(true), BuildMode::Release) => Err(SigningKeyConfigError::EphemeralNotAllowed),
        (Some(flag), _) => Ok(flag),
        (None, BuildMode::Debug) => {
            warn!(value = %value, "invalid IDENTITY_ALLOW_EPHEMERAL; treating as disabled");
            Ok(false)
        }
        (None, BuildMode::Release) => Err(SigningKeyConfigError::InvalidEnv {
            name: ALLOW_EPHEMERAL_ENV,
            value,
            expected: BOOL_EXPECTED,
        }),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
