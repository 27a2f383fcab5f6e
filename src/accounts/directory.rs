//! The shared account directory (`users.json`).
//!
//! A flat JSON object mapping each username to its stored secret.  The
//! file is read in full on every call and rewritten atomically on
//! registration.  A missing or blank file is an empty directory.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::crypto::secret_hash::{seal_secret, verify_secret, SecretStorage};
use crate::errors::{PassVaultError, Result};
use crate::vault::format::write_atomic;

/// Longest username we accept; it becomes a directory and file name.
const MAX_USERNAME_LEN: usize = 64;

/// Handle on the account directory file.
#[derive(Debug, Clone)]
pub struct AccountDirectory {
    path: PathBuf,
    storage: SecretStorage,
}

impl AccountDirectory {
    /// Bind to the directory file at `path`.  New secrets are written
    /// in the given `storage` form.
    pub fn new(path: impl Into<PathBuf>, storage: SecretStorage) -> Self {
        Self {
            path: path.into(),
            storage,
        }
    }

    /// Returns `true` if `username` exists and `secret` matches.
    pub fn authenticate(&self, username: &str, secret: &str) -> Result<bool> {
        let users = self.load()?;
        let matched = users
            .get(username)
            .is_some_and(|stored| verify_secret(stored, secret));
        debug!(username, matched, "authentication attempt");
        Ok(matched)
    }

    /// Add a new account.
    ///
    /// Fails with `UsernameTaken` if the name is already registered, in
    /// which case the file is left untouched.
    pub fn register(&self, username: &str, secret: &str) -> Result<()> {
        validate_username(username)?;

        let mut users = self.load()?;
        if users.contains_key(username) {
            return Err(PassVaultError::UsernameTaken(username.to_string()));
        }

        users.insert(username.to_string(), seal_secret(self.storage, secret)?);
        self.save(&users)?;

        info!(username, storage = ?self.storage, "registered account");
        Ok(())
    }

    /// Returns `true` if `username` is registered.
    pub fn contains(&self, username: &str) -> Result<bool> {
        Ok(self.load()?.contains_key(username))
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| {
            PassVaultError::InvalidAccountDirectory(format!("{}: {e}", self.path.display()))
        })
    }

    fn save(&self, users: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_vec(users)
            .map_err(|e| PassVaultError::SerializationError(format!("users: {e}")))?;
        write_atomic(&self.path, &json)
    }
}

/// Validate that a username is safe to use as a directory name.
///
/// Any character is allowed except path separators, NUL and control
/// characters.  Must be non-empty, at most 64 characters, and not
/// `.` or `..`.
pub fn validate_username(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(PassVaultError::InvalidUsername(
            "username cannot be empty".into(),
        ));
    }

    if name.chars().count() > MAX_USERNAME_LEN {
        return Err(PassVaultError::InvalidUsername(format!(
            "username cannot exceed {MAX_USERNAME_LEN} characters"
        )));
    }

    if name == "." || name == ".." {
        return Err(PassVaultError::InvalidUsername(format!(
            "'{name}' is reserved"
        )));
    }

    if name
        .chars()
        .any(|c| c == '/' || c == '\\' || c.is_control())
    {
        return Err(PassVaultError::InvalidUsername(
            "username cannot contain slashes or control characters".into(),
        ));
    }

    Ok(())
}
