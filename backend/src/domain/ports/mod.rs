//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod account_registry;
mod password_hasher;
mod token_issuer;

pub use account_command::{
    AccountCommand, CreateAccountRequest, CreateAccountResponse, EditProfileRequest,
    LoginResponse,
};
pub use account_query::AccountQuery;
#[cfg(test)]
pub use account_registry::MockAccountRegistry;
pub use account_registry::{AccountRegistry, AccountRegistryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenError, TokenIssuer};
