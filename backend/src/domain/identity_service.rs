//! Account identity domain service.
//!
//! `IdentityService` implements the [`AccountCommand`] and [`AccountQuery`]
//! driving ports by orchestrating the account registry, the password hasher
//! and the token issuer. It holds no mutable state of its own; the registry's
//! uniqueness constraint is what keeps emails unique under concurrency.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    AccountCommand, AccountQuery, AccountRegistry, AccountRegistryError, CreateAccountRequest,
    CreateAccountResponse, EditProfileRequest, LoginResponse, PasswordHasher, TokenIssuer,
};
use crate::domain::{AccountRecord, Error, LoginCredentials, NewAccount, User, UserId};

const CREATE_FAILED_MESSAGE: &str = "Could not create account";
const LOGIN_FAILED_MESSAGE: &str = "Could not log in";

/// Identity service implementing the account driving ports.
pub struct IdentityService<R, H, T> {
    registry: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> Clone for IdentityService<R, H, T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

impl<R, H, T> IdentityService<R, H, T> {
    /// Create a new service over the given collaborators.
    pub fn new(registry: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            registry,
            hasher,
            tokens,
        }
    }
}

impl<R, H, T> IdentityService<R, H, T>
where
    R: AccountRegistry,
    H: PasswordHasher,
    T: TokenIssuer,
{
    fn map_create_error(error: AccountRegistryError) -> Error {
        match error {
            AccountRegistryError::DuplicateEmail { .. } => {
                debug!(%error, "registration lost a duplicate-email race");
                Error::account_exists()
            }
            other => {
                error!(error = %other, "account registry rejected a new account");
                Error::internal(CREATE_FAILED_MESSAGE).with_cause(other)
            }
        }
    }

    async fn load_for_update(&self, user_id: UserId) -> Result<User, Error> {
        match self.registry.find_by_id(&user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => {
                debug!(%user_id, "profile edit for unknown account");
                Err(Error::update_failed().with_cause(format!("no account with id {user_id}")))
            }
            Err(error) => {
                warn!(%user_id, %error, "account lookup failed during profile edit");
                Err(Error::update_failed().with_cause(error))
            }
        }
    }
}

#[async_trait]
impl<R, H, T> AccountCommand for IdentityService<R, H, T>
where
    R: AccountRegistry,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, Error> {
        let CreateAccountRequest {
            email,
            password,
            role,
        } = request;

        match self.registry.find_by_email(&email).await {
            Ok(Some(_)) => {
                debug!(role = %role, "registration rejected for a taken email");
                return Err(Error::account_exists());
            }
            Ok(None) => {}
            Err(error) => {
                error!(%error, "account lookup failed during registration");
                return Err(Error::internal(CREATE_FAILED_MESSAGE).with_cause(error));
            }
        }

        let password_hash = self.hasher.hash(&password).await.map_err(|error| {
            error!(%error, "password hashing failed during registration");
            Error::internal(CREATE_FAILED_MESSAGE).with_cause(error)
        })?;

        let draft = self
            .registry
            .create(NewAccount::new(email, password_hash, role));
        let user = self
            .registry
            .save(draft)
            .await
            .map_err(Self::map_create_error)?;

        info!(user_id = %user.id(), role = %user.role(), "account created");
        Ok(CreateAccountResponse { id: user.id() })
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, Error> {
        let user = match self.registry.find_by_email(credentials.email()).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("login rejected: unknown email");
                return Err(Error::user_not_found());
            }
            Err(error) => {
                error!(%error, "account lookup failed during login");
                return Err(Error::internal(LOGIN_FAILED_MESSAGE).with_cause(error));
            }
        };

        if !self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .await
        {
            debug!(user_id = %user.id(), "login rejected: wrong password");
            return Err(Error::wrong_credentials());
        }

        let token = self.tokens.sign(&user.id()).map_err(|error| {
            error!(user_id = %user.id(), %error, "token signing failed");
            Error::internal(LOGIN_FAILED_MESSAGE).with_cause(error)
        })?;

        info!(user_id = %user.id(), "access token issued");
        Ok(LoginResponse { token })
    }

    async fn edit_profile(&self, request: EditProfileRequest) -> Result<(), Error> {
        let EditProfileRequest { user_id, changes } = request;
        let mut user = self.load_for_update(user_id).await?;

        if let Some(email) = changes.email {
            user = user.with_email(email);
        }
        if let Some(password) = changes.password {
            let password_hash = self.hasher.hash(&password).await.map_err(|error| {
                warn!(%user_id, %error, "password hashing failed during profile edit");
                Error::update_failed().with_cause(error)
            })?;
            user = user.with_password_hash(password_hash);
        }

        self.registry
            .save(AccountRecord::Persisted(user))
            .await
            .map_err(|error| {
                warn!(%user_id, %error, "account save failed during profile edit");
                Error::update_failed().with_cause(error)
            })?;

        info!(%user_id, "profile updated");
        Ok(())
    }
}

#[async_trait]
impl<R, H, T> AccountQuery for IdentityService<R, H, T>
where
    R: AccountRegistry,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn find_by_id(&self, user_id: UserId) -> Result<User, Error> {
        match self.registry.find_by_id(&user_id).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(Error::user_not_found()),
            Err(error) => {
                warn!(%user_id, %error, "account lookup failed");
                Err(Error::user_not_found().with_cause(error))
            }
        }
    }
}

#[cfg(test)]
#[path = "identity_service_tests.rs"]
mod tests;
