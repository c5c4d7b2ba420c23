//! Identity core for the podcast backend.
//!
//! Account creation, credential verification, bearer-token issuance, and
//! profile edits. The domain layer owns orchestration and talks to storage,
//! hashing, and token signing only through ports; `outbound` holds the
//! adapters and `config` loads process-wide settings and the signing key.

pub mod config;
pub mod domain;
pub mod outbound;

pub use domain::IdentityService;
