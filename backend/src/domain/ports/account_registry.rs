//! Port abstraction for account storage adapters and their errors.
use async_trait::async_trait;

use crate::domain::{AccountRecord, Email, NewAccount, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account registry adapters.
    pub enum AccountRegistryError {
        /// Registry connection could not be established.
        Connection { message: String } => "account registry connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account registry query failed: {message}",
        /// Another account already uses the email.
        DuplicateEmail { email: String } => "an account with email {email} already exists",
    }
}

/// Storage of accounts keyed by id and by email.
///
/// Adapters must make the email check and the insert performed by
/// [`AccountRegistry::save`] one atomic step, so two concurrent drafts for the
/// same email cannot both be stored.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRegistry: Send + Sync {
    /// Fetch the account registered under `email`, if any.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AccountRegistryError>;

    /// Fetch the account with the given id, if any.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountRegistryError>;

    /// Build an unsaved record from account fields. Performs no I/O.
    fn create(&self, account: NewAccount) -> AccountRecord;

    /// Insert a draft or update a persisted user, returning the stored user.
    ///
    /// Inserting a draft whose email is taken fails with
    /// [`AccountRegistryError::DuplicateEmail`].
    async fn save(&self, record: AccountRecord) -> Result<User, AccountRegistryError>;
}
