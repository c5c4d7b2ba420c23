//! Domain primitives, ports, and the identity service.
//!
//! Purpose: define strongly typed identity values and the orchestration that
//! uses them. Adapters live in `outbound`; everything here is transport and
//! storage agnostic.
//!
//! Public surface:
//! - Error / ErrorCode — structured failure returned by every operation.
//! - User, UserId, Email, Role, HashedPassword, NewAccount, AccountRecord.
//! - Password, LoginCredentials, ProfileChanges, AccessToken.
//! - IdentityService — implements the `AccountCommand` and `AccountQuery`
//!   driving ports.

pub mod auth;
pub mod error;
pub mod identity_service;
pub mod ports;
pub mod user;

pub use self::auth::{AccessToken, LoginCredentials, LoginValidationError, Password, ProfileChanges};
pub use self::error::{Error, ErrorCode};
pub use self::identity_service::IdentityService;
pub use self::user::{
    AccountRecord, Email, HashedPassword, NewAccount, Role, RoleParseError, User, UserId,
    UserValidationError,
};

/// Convenient result alias for identity operations.
///
/// # Examples
/// ```
/// use podcast_identity::domain::{Error, IdentityResult, UserId};
///
/// fn lookup() -> IdentityResult<UserId> {
///     Err(Error::user_not_found())
/// }
/// assert!(lookup().is_err());
/// ```
pub type IdentityResult<T> = Result<T, Error>;
