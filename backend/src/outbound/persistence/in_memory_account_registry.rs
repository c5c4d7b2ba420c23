//! Mutex-guarded in-memory implementation of the `AccountRegistry` port.
//!
//! The email index is checked under the same lock that allocates the id, so
//! a second draft for a taken email fails with `DuplicateEmail`. A durable
//! adapter must give the same guarantee with a unique index on email and
//! map the database's unique-violation error to
//! `AccountRegistryError::DuplicateEmail`; the service relies on that
//! variant to report `AccountExists` after losing a registration race.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{AccountRegistry, AccountRegistryError};
use crate::domain::{AccountRecord, Email, NewAccount, User, UserId};

#[derive(Debug)]
struct RegistryState {
    users: BTreeMap<UserId, User>,
    by_email: HashMap<Email, UserId>,
    next_id: i64,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            by_email: HashMap::new(),
            next_id: 1,
        }
    }
}

impl RegistryState {
    fn insert(&mut self, account: NewAccount) -> Result<User, AccountRegistryError> {
        if self.by_email.contains_key(&account.email) {
            return Err(AccountRegistryError::duplicate_email(account.email.as_ref()));
        }
        let id = UserId::new(self.next_id)
            .map_err(|err| AccountRegistryError::query(format!("id allocation failed: {err}")))?;
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| AccountRegistryError::query("user id space exhausted"))?;

        let user = User::new(id, account.email, account.password_hash, account.role);
        self.by_email.insert(user.email().clone(), id);
        self.users.insert(id, user.clone());
        debug!(user_id = %id, "account inserted");
        Ok(user)
    }

    fn update(&mut self, changed: User) -> Result<User, AccountRegistryError> {
        let id = changed.id();
        let Some(current) = self.users.get(&id).cloned() else {
            return Err(AccountRegistryError::query(format!("no account with id {id}")));
        };

        if current.email() != changed.email() {
            if self
                .by_email
                .get(changed.email())
                .is_some_and(|owner| *owner != id)
            {
                return Err(AccountRegistryError::duplicate_email(changed.email().as_ref()));
            }
            self.by_email.remove(current.email());
            self.by_email.insert(changed.email().clone(), id);
        }

        let stored = current
            .with_email(changed.email().clone())
            .with_password_hash(changed.password_hash().clone());
        self.users.insert(id, stored.clone());
        debug!(user_id = %id, "account updated");
        Ok(stored)
    }
}

/// Account registry that keeps every account in process memory.
///
/// Ids are assigned sequentially from 1. The email check and the write
/// happen under one lock, so concurrent drafts for the same email produce
/// exactly one stored account.
#[derive(Debug, Default)]
pub struct InMemoryAccountRegistry {
    state: Mutex<RegistryState>,
}

impl InMemoryAccountRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub fn len(&self) -> Result<usize, AccountRegistryError> {
        Ok(self.lock()?.users.len())
    }

    /// True when no account is stored.
    pub fn is_empty(&self) -> Result<bool, AccountRegistryError> {
        Ok(self.lock()?.users.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>, AccountRegistryError> {
        self.state
            .lock()
            .map_err(|_| AccountRegistryError::connection("account registry lock poisoned"))
    }
}

#[async_trait]
impl AccountRegistry for InMemoryAccountRegistry {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AccountRegistryError> {
        let state = self.lock()?;
        Ok(state
            .by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AccountRegistryError> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    fn create(&self, account: NewAccount) -> AccountRecord {
        AccountRecord::Draft(account)
    }

    async fn save(&self, record: AccountRecord) -> Result<User, AccountRegistryError> {
        let mut state = self.lock()?;
        match record {
            AccountRecord::Draft(account) => state.insert(account),
            AccountRecord::Persisted(user) => state.update(user),
        }
    }
}
