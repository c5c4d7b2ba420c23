//! HS256 JWT implementation of the `TokenIssuer` port.
//!
//! Claims are `sub` (the user id as a decimal string), `iat` and, when a
//! lifetime is configured, `exp`. Expiry is checked against the injected
//! clock rather than the system time so it can be driven from tests.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::config::SigningKey;
use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AccessToken, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
}

/// Token issuer signing with a process-wide HMAC secret.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: Option<i64>,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    /// Build an issuer from the loaded signing key.
    ///
    /// `ttl` of `None` issues tokens without an `exp` claim.
    pub fn new(key: &SigningKey, ttl: Option<Duration>, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            encoding: EncodingKey::from_secret(key.as_bytes()),
            decoding: DecodingKey::from_secret(key.as_bytes()),
            validation,
            ttl_secs: ttl.map(|ttl| i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)),
            clock,
        }
    }

    fn map_decode_error(error: JwtError) -> TokenError {
        match error.kind() {
            ErrorKind::InvalidSignature => TokenError::invalid_signature(),
            ErrorKind::ExpiredSignature => TokenError::expired(),
            _ => TokenError::malformed(error.to_string()),
        }
    }
}

impl fmt::Debug for JwtTokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtTokenIssuer")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn sign(&self, user_id: &UserId) -> Result<AccessToken, TokenError> {
        let issued_at = self.clock.utc().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: issued_at,
            exp: self
                .ttl_secs
                .map(|ttl| issued_at.saturating_add(ttl)),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(Self::map_decode_error)?;
        let now = self.clock.utc().timestamp();
        if data.claims.exp.is_some_and(|exp| now >= exp) {
            return Err(TokenError::expired());
        }
        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|err| TokenError::malformed(format!("subject is not a user id: {err}")))
    }
}
