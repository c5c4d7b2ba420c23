//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **crypto**: Argon2id password hashing and HS256 token signing.
//! - **persistence**: an in-memory account registry that enforces email
//!   uniqueness atomically.
//!
//! Adapters are thin translators between domain types and the underlying
//! primitives. They contain no business logic.

pub mod crypto;
pub mod persistence;
