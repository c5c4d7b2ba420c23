//! Domain-level error type returned by identity operations.
//!
//! Errors are transport agnostic. Inbound adapters map the stable
//! [`ErrorCode`] to HTTP statuses, GraphQL `ok: false` envelopes, or any
//! other protocol-specific shape.

use serde::Serialize;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// An account with the requested email already exists.
    AccountExists,
    /// No account matches the supplied id or email.
    UserNotFound,
    /// The account exists but the password did not verify.
    WrongCredentials,
    /// A profile edit could not be applied.
    UpdateFailed,
    /// A collaborator failed while serving the request.
    InternalError,
}

const ACCOUNT_EXISTS_MESSAGE: &str = "There is a user with that email already";
const USER_NOT_FOUND_MESSAGE: &str = "User not found";
const WRONG_CREDENTIALS_MESSAGE: &str = "Wrong password";
const UPDATE_FAILED_MESSAGE: &str = "Could not update profile";

/// Domain error payload.
///
/// ## Invariants
/// - `message` is safe to show to callers; it never embeds collaborator
///   output.
/// - `cause` holds the collaborator failure text for logs and diagnostics.
///   It is excluded from `Display` and from the serialised form.
///
/// # Examples
/// ```
/// use podcast_identity::domain::{Error, ErrorCode};
///
/// let err = Error::internal("Could not log in").with_cause("connection refused");
/// assert_eq!(err.code(), ErrorCode::InternalError);
/// assert_eq!(err.to_string(), "Could not log in");
/// assert_eq!(err.cause(), Some("connection refused"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip)]
    cause: Option<String>,
}

impl Error {
    /// Create an error with an explicit code and caller-facing message.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Underlying collaborator failure, when one triggered this error.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }

    /// Attach the underlying collaborator failure.
    #[must_use]
    pub fn with_cause(mut self, cause: impl ToString) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// Convenience constructor for [`ErrorCode::AccountExists`].
    pub fn account_exists() -> Self {
        Self::new(ErrorCode::AccountExists, ACCOUNT_EXISTS_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::UserNotFound`].
    pub fn user_not_found() -> Self {
        Self::new(ErrorCode::UserNotFound, USER_NOT_FOUND_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::WrongCredentials`].
    pub fn wrong_credentials() -> Self {
        Self::new(ErrorCode::WrongCredentials, WRONG_CREDENTIALS_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::UpdateFailed`].
    pub fn update_failed() -> Self {
        Self::new(ErrorCode::UpdateFailed, UPDATE_FAILED_MESSAGE)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
