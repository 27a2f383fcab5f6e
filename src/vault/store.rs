//! High-level record operations used by the menu commands.
//!
//! `RecordStore` wraps the file format layer and the crypto layer so the
//! rest of the application can work with calls like
//! `store.add("example.com", "hunter2")`.  Every mutating call is a
//! full load-modify-save cycle; nothing is cached between calls.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::encryption::{decrypt_token, encrypt_token};
use crate::crypto::VaultKey;
use crate::errors::{PassVaultError, Result};

use super::format;
use super::record::{normalize_website, AddOutcome, PasswordEntry, RecordMap};

/// Handle on one user's vault file, bound to that user's key.
pub struct RecordStore<'k> {
    /// Path to the `<username>_passwords.db` file.
    path: PathBuf,

    /// The user's vault key, borrowed from the session.
    key: &'k VaultKey,
}

impl<'k> RecordStore<'k> {
    /// Bind a store to a vault file and the key that opens it.
    pub fn new(path: impl Into<PathBuf>, key: &'k VaultKey) -> Self {
        Self {
            path: path.into(),
            key,
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Load the website -> token map.  A missing vault is empty.
    pub fn load(&self) -> Result<RecordMap> {
        format::read_vault(&self.path, self.key)
    }

    /// Encrypt the whole map as one blob and overwrite the vault file.
    pub fn save(&self, records: &RecordMap) -> Result<()> {
        format::write_vault(&self.path, self.key, records)
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Store `password` for `website`, replacing any previous one.
    ///
    /// Other entries are carried over as stored tokens without being
    /// decrypted.
    pub fn add(&self, website: &str, password: &str) -> Result<AddOutcome> {
        let website = normalize_website(website)?;
        let mut records = self.load()?;

        let token = encrypt_token(self.key.as_bytes(), password.as_bytes())?;
        let outcome = match records.insert(website.clone(), token) {
            Some(_) => AddOutcome::Replaced,
            None => AddOutcome::Added,
        };

        self.save(&records)?;
        info!(website = %website, ?outcome, "stored password");
        Ok(outcome)
    }

    /// Delete the entry for `website`.
    ///
    /// Returns `WebsiteNotFound` and leaves the file untouched when there
    /// is no such entry.
    pub fn remove(&self, website: &str) -> Result<()> {
        let website = normalize_website(website)?;
        let mut records = self.load()?;

        if records.remove(&website).is_none() {
            debug!(website = %website, "remove: no such website");
            return Err(PassVaultError::WebsiteNotFound(website));
        }

        self.save(&records)?;
        info!(website = %website, "removed password");
        Ok(())
    }

    /// Decrypt every entry, ordered by website.
    ///
    /// One entry that fails to decrypt fails the whole listing.
    pub fn view(&self) -> Result<Vec<PasswordEntry>> {
        let records = self.load()?;
        records
            .into_iter()
            .map(|(website, token)| {
                let password = open_password(&self.path, self.key, &website, &token)?;
                Ok(PasswordEntry { website, password })
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Number of stored records.  No value is decrypted.
    pub fn count(&self) -> Result<usize> {
        Ok(self.load()?.len())
    }

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Decrypt one password token into a zeroizing string.
fn open_password(
    path: &Path,
    key: &VaultKey,
    website: &str,
    token: &str,
) -> Result<Zeroizing<String>> {
    let bytes = decrypt_token(key.as_bytes(), token)?;

    String::from_utf8(bytes).map(Zeroizing::new).map_err(|e| {
        let mut bad_bytes = e.into_bytes();
        bad_bytes.zeroize();
        PassVaultError::InvalidVaultFormat {
            path: path.to_path_buf(),
            reason: format!("password for '{website}' is not valid UTF-8"),
        }
    })
}
