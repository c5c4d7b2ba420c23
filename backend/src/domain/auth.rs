//! Authentication primitives: plaintext passwords, login credentials,
//! profile changes, and issued access tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

use super::user::{Email, UserValidationError};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    Email(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(error) => error.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Caller-supplied plaintext password.
///
/// The buffer is wiped on drop and `Debug` output is redacted. Whitespace is
/// kept as given to avoid surprising credential comparisons.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and wrap a plaintext password.
    pub fn new(plaintext: &str) -> Result<Self, LoginValidationError> {
        if plaintext.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(plaintext.to_owned())))
    }

    /// Plaintext for handing to a hasher. Never log or persist the result.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Validated login credentials used by authentication services.
///
/// # Examples
/// ```
/// use podcast_identity::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" a@b.com ", "pw1").unwrap();
/// assert_eq!(creds.email().as_ref(), "a@b.com");
/// assert_eq!(creds.password().expose(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Password,
}

impl LoginCredentials {
    /// Build credentials from validated parts.
    pub fn new(email: Email, password: Password) -> Self {
        Self { email, password }
    }

    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(LoginValidationError::Email)?;
        let password = Password::new(password)?;
        Ok(Self { email, password })
    }

    /// Email used for the account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Partial profile edit. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// Replacement login email.
    pub email: Option<Email>,
    /// Replacement password; hashed before it is stored.
    pub password: Option<Password>,
}

impl ProfileChanges {
    /// Change only the email.
    pub fn change_email(email: Email) -> Self {
        Self {
            email: Some(email),
            password: None,
        }
    }

    /// Change only the password.
    pub fn change_password(password: Password) -> Self {
        Self {
            email: None,
            password: Some(password),
        }
    }

    /// True when neither field is supplied.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Signed bearer token returned by a successful login.
///
/// Opaque to everything except the `TokenIssuer` that produced it. `Debug`
/// output is redacted because the token grants the holder a session.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap an encoded token.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded token string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::Email(UserValidationError::EmptyEmail))]
    #[case("   ", "pw", LoginValidationError::Email(UserValidationError::EmptyEmail))]
    #[case("nope", "pw", LoginValidationError::Email(UserValidationError::InvalidEmail))]
    #[case("a@b.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  a@b.com  ", "pw1")]
    #[case("go@gmail.com", " correct horse battery staple ")]
    fn valid_credentials_trim_email_only(#[case] email: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(email, password)
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_ref(), email.trim());
        assert_eq!(creds.password().expose(), password);
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2").expect("valid password");
        assert_eq!(format!("{password:?}"), "Password(<redacted>)");
    }

    #[rstest]
    fn access_token_debug_is_redacted() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiJ9.payload.sig");
        assert!(!format!("{token:?}").contains("payload"));
        assert_eq!(token.as_str(), "eyJhbGciOiJIUzI1NiJ9.payload.sig");
    }

    #[rstest]
    fn profile_changes_report_emptiness() {
        assert!(ProfileChanges::default().is_empty());
        let password = Password::new("4567").expect("valid password");
        assert!(!ProfileChanges::change_password(password).is_empty());
    }
}
