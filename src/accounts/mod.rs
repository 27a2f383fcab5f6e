//! Account directory: who may log in, and with which secret.

pub mod directory;

pub use directory::{validate_username, AccountDirectory};
