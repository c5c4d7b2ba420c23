//! Account persistence adapters.
//!
//! Only an in-process store ships today. It upholds the same contract a
//! database-backed registry must: absence is `None`, ids are assigned on
//! insert, and a taken email is reported as `DuplicateEmail` from the same
//! critical section that performs the write.

mod in_memory_account_registry;

pub use in_memory_account_registry::InMemoryAccountRegistry;
