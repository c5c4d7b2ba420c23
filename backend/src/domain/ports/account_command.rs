//! Driving port for account mutations and authentication.
//!
//! Inbound adapters call [`AccountCommand`] to register accounts, log in and
//! edit profiles without knowing which hasher, token issuer or registry sits
//! behind it.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{
    AccessToken, Email, Error, LoginCredentials, Password, ProfileChanges, Role, UserId,
};

/// Request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountRequest {
    /// Login email; must not already be registered.
    pub email: Email,
    /// Initial plaintext password.
    pub password: Password,
    /// Role tag fixed at creation.
    pub role: Role,
}

/// Response from a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountResponse {
    /// Id assigned by the registry.
    pub id: UserId,
}

/// Response from a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token whose subject is the account id.
    pub token: AccessToken,
}

/// Request to change fields on an existing account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditProfileRequest {
    /// Account being edited.
    pub user_id: UserId,
    /// Fields to replace; absent fields are kept.
    pub changes: ProfileChanges,
}

/// Domain use-case port for account mutations.
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Register an account.
    ///
    /// Fails with `AccountExists` when the email is taken and with
    /// `InternalError` when a collaborator fails.
    async fn create_account(
        &self,
        request: CreateAccountRequest,
    ) -> Result<CreateAccountResponse, Error>;

    /// Check credentials and issue a token.
    ///
    /// Fails with `UserNotFound`, `WrongCredentials` or `InternalError`.
    async fn login(&self, credentials: LoginCredentials) -> Result<LoginResponse, Error>;

    /// Apply a partial profile edit. Every failure maps to `UpdateFailed`.
    async fn edit_profile(&self, request: EditProfileRequest) -> Result<(), Error>;
}
