//! User data model.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// User ids are assigned by storage and start at 1.
    NonPositiveId,
    /// Email was missing or blank once trimmed.
    EmptyEmail,
    /// Email is not of the form `local@domain`.
    InvalidEmail,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "user id must be a positive integer"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like local@domain"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier assigned by the account registry on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id < 1 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let id = raw
            .parse::<i64>()
            .map_err(|_| UserValidationError::NonPositiveId)?;
        Self::new(id)
    }
}

/// Login key of an account.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed; the remainder is non-empty.
/// - Contains exactly one `@` with non-empty, whitespace-free parts.
/// - Comparison is exact: `Ann@example.com` and `ann@example.com` are
///   different accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate and construct an [`Email`].
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Error returned when parsing an unknown role tag.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'; expected Client or Owner")]
pub struct RoleParseError(String);

/// Role tag stored with an account. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    /// Listener account.
    Client,
    /// Podcast owner account.
    Owner,
}

impl Role {
    /// Canonical tag as stored.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Owner => "Owner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "client" => Ok(Self::Client),
            "owner" => Ok(Self::Owner),
            _ => Err(RoleParseError(raw.to_owned())),
        }
    }
}

/// One-way hash of a password, as produced by a `PasswordHasher`.
///
/// The value is an encoded hash (e.g. a PHC string), never plaintext.
/// `Debug` output is redacted so hashes do not end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Wrap an encoded hash produced by a hasher or loaded from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded hash string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(<redacted>)")
    }
}

/// Application user.
///
/// ## Invariants
/// - `id` is assigned by the registry and never changes.
/// - `password_hash` is always hasher output; it is skipped when the user is
///   serialised for callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: Email,
    #[serde(skip)]
    password_hash: HashedPassword,
    role: Role,
}

impl User {
    /// Build a [`User`] from persisted components.
    pub fn new(id: UserId, email: Email, password_hash: HashedPassword, role: Role) -> Self {
        Self {
            id,
            email,
            password_hash,
            role,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login email.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &HashedPassword {
        &self.password_hash
    }

    /// Role tag.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Copy of this user with a replaced email.
    #[must_use]
    pub fn with_email(self, email: Email) -> Self {
        Self { email, ..self }
    }

    /// Copy of this user with a replaced password hash.
    #[must_use]
    pub fn with_password_hash(self, password_hash: HashedPassword) -> Self {
        Self {
            password_hash,
            ..self
        }
    }
}

/// Field set for an account that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    /// Login email.
    pub email: Email,
    /// Hash of the initial password.
    pub password_hash: HashedPassword,
    /// Role tag.
    pub role: Role,
}

impl NewAccount {
    /// Assemble a draft from already-hashed fields.
    pub fn new(email: Email, password_hash: HashedPassword, role: Role) -> Self {
        Self {
            email,
            password_hash,
            role,
        }
    }
}

/// Record handed to `AccountRegistry::save`.
///
/// A draft has no id and is inserted; a persisted user is updated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountRecord {
    /// Not yet stored; the registry assigns an id on save.
    Draft(NewAccount),
    /// Already stored; save updates its email and password hash.
    Persisted(User),
}

impl AccountRecord {
    /// Email carried by the record.
    pub fn email(&self) -> &Email {
        match self {
            Self::Draft(account) => &account.email,
            Self::Persisted(user) => user.email(),
        }
    }
}

#[cfg(test)]
mod tests;
