//! Password record types stored inside a vault.

use std::collections::BTreeMap;

use zeroize::Zeroizing;

use crate::errors::{PassVaultError, Result};

/// Website -> encrypted password token, ordered by website.
///
/// This is the structure that gets serialized, encrypted as a whole,
/// and written to the vault file.  Values are never decrypted unless a
/// caller asks for plaintext.
pub type RecordMap = BTreeMap<String, String>;

/// A decrypted record, returned by `RecordStore::view`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordEntry {
    pub website: String,
    pub password: Zeroizing<String>,
}

/// What `RecordStore::add` did with the website key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// An existing password for the same website was overwritten.
    Replaced,
}

/// Trim a website name and reject it if nothing is left.
pub fn normalize_website(website: &str) -> Result<String> {
    let trimmed = website.trim();
    if trimmed.is_empty() {
        return Err(PassVaultError::InvalidWebsite(
            "website name cannot be empty".into(),
        ));
    }
    Ok(trimmed.to_string())
}
