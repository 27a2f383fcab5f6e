use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::SecretStorage;
use crate::errors::{PassVaultError, Result};

/// Vault configuration, loaded from `<root>/.passvault.toml`.
///
/// Every field has a default matching the classic on-disk layout, so
/// PassVault works out-of-the-box without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Shared account directory file (relative to the root).
    #[serde(default = "default_users_file")]
    pub users_file: String,

    /// Directory (relative to the root) holding one folder per user.
    #[serde(default = "default_users_dir")]
    pub users_dir: String,

    /// Name of the per-user key file.
    #[serde(default = "default_key_file")]
    pub key_file: String,

    /// How new account secrets are stored: "plaintext" or "argon2".
    #[serde(default)]
    pub secret_storage: SecretStorage,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_users_file() -> String {
    "users.json".to_string()
}

fn default_users_dir() -> String {
    "users".to_string()
}

fn default_key_file() -> String {
    "key.key".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            users_file: default_users_file(),
            users_dir: default_users_dir(),
            key_file: default_key_file(),
            secret_storage: SecretStorage::default(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the root directory.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<root>/.passvault.toml`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Path to the shared account directory file.
    pub fn users_file_path(&self, root: &Path) -> PathBuf {
        root.join(&self.users_file)
    }

    /// Path to the folder that holds every user's directory.
    pub fn users_dir_path(&self, root: &Path) -> PathBuf {
        root.join(&self.users_dir)
    }

    /// Path to one user's directory, e.g. `root/users/alice`.
    pub fn user_dir(&self, root: &Path, username: &str) -> PathBuf {
        self.users_dir_path(root).join(username)
    }

    /// Path to one user's key file, e.g. `root/users/alice/key.key`.
    pub fn key_path(&self, root: &Path, username: &str) -> PathBuf {
        self.user_dir(root, username).join(&self.key_file)
    }

    /// Path to one user's vault, e.g. `root/users/alice/alice_passwords.db`.
    pub fn vault_path(&self, root: &Path, username: &str) -> PathBuf {
        self.user_dir(root, username)
            .join(format!("{username}_passwords.db"))
    }

    /// Reject empty names; everything else is taken as given.
    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("users_file", &self.users_file),
            ("users_dir", &self.users_dir),
            ("key_file", &self.key_file),
        ] {
            if value.trim().is_empty() {
                return Err(PassVaultError::ConfigError(format!(
                    "`{field}` cannot be empty"
                )));
            }
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────
