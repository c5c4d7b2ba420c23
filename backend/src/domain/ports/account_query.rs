//! Driving port for account lookups.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for reading accounts.
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Fetch a user by id. Absence and lookup failure both map to
    /// `UserNotFound`.
    async fn find_by_id(&self, user_id: UserId) -> Result<User, Error>;
}
