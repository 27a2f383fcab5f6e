//! Vault module: encrypted per-user password storage.
//!
//! This module provides:
//! - `RecordMap`, `PasswordEntry` and `AddOutcome` types (`record`)
//! - The single-token vault file format (`format`)
//! - `RecordStore` for the add / remove / view cycle (`store`)

pub mod format;
pub mod record;
pub mod store;

pub use record::{AddOutcome, PasswordEntry, RecordMap};
pub use store::RecordStore;
