//! A logged-in user's context.
//!
//! `Session` replaces "current user" state: it is created by a
//! successful login or signup, owns that user's vault key, and hands out
//! a `RecordStore` for every password operation.  Dropping it is
//! logging out; the key is zeroed with it.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::accounts::{validate_username, AccountDirectory};
use crate::config::Settings;
use crate::crypto::keyfile::load_or_generate_keyfile;
use crate::crypto::VaultKey;
use crate::errors::{PassVaultError, Result};
use crate::vault::RecordStore;

/// Everything needed to work on one user's vault.
#[derive(Debug)]
pub struct Session {
    username: String,
    vault_path: PathBuf,
    key: VaultKey,
}

impl Session {
    /// Open a session for `username`, creating the user's directory and
    /// key file if this is the first time.
    ///
    /// Does not check credentials; use `login` or `signup` for that.
    pub fn open(settings: &Settings, root: &Path, username: &str) -> Result<Self> {
        validate_username(username)?;

        let key = load_or_generate_keyfile(&settings.key_path(root, username))?;

        Ok(Self {
            username: username.to_string(),
            vault_path: settings.vault_path(root, username),
            key,
        })
    }

    /// Check credentials against `directory` and open a session.
    pub fn login(
        directory: &AccountDirectory,
        settings: &Settings,
        root: &Path,
        username: &str,
        secret: &str,
    ) -> Result<Self> {
        if !directory.authenticate(username, secret)? {
            return Err(PassVaultError::InvalidCredentials);
        }

        let session = Self::open(settings, root, username)?;
        info!(username, "logged in");
        Ok(session)
    }

    /// Register a new account and open a session for it.
    ///
    /// The user's key is loaded or created first, so a stale unusable key
    /// file fails the signup before anything is written to `directory`.
    pub fn signup(
        directory: &AccountDirectory,
        settings: &Settings,
        root: &Path,
        username: &str,
        secret: &str,
    ) -> Result<Self> {
        validate_username(username)?;
        if directory.contains(username)? {
            return Err(PassVaultError::UsernameTaken(username.to_string()));
        }

        let session = Self::open(settings, root, username)?;
        directory.register(username, secret)?;
        info!(username, "signed up");
        Ok(session)
    }

    /// The record store for this user's vault.
    pub fn record_store(&self) -> RecordStore<'_> {
        RecordStore::new(&self.vault_path, &self.key)
    }

    /// Returns the logged-in username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the path to this user's vault file.
    pub fn vault_path(&self) -> &Path {
        &self.vault_path
    }

    /// Returns this user's vault key.
    pub fn key(&self) -> &VaultKey {
        &self.key
    }
}
