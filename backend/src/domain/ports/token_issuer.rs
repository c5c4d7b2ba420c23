//! Port abstraction for signing and checking access tokens.
use crate::domain::{AccessToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Reasons a token could not be produced or was rejected.
    pub enum TokenError {
        /// The token is not a well-formed encoding or its subject is not an id.
        Malformed { message: String } => "token is malformed: {message}",
        /// The signature does not match the issuer's key.
        InvalidSignature => "token signature is invalid",
        /// The token's expiry time has passed.
        Expired => "token has expired",
        /// Encoding the token failed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues bearer tokens bound to a user id.
///
/// The signing key is loaded once at startup and kept by the implementation;
/// tokens signed with a different key never verify.
#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Sign a token whose subject is `user_id`.
    fn sign(&self, user_id: &UserId) -> Result<AccessToken, TokenError>;

    /// Check a token and return the user id it was issued for.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
