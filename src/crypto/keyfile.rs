//! Per-user key file storage.
//!
//! Each user owns one `key.key` file holding 32 raw random bytes.  The
//! file is created the first time the user logs in or signs up and is
//! never rotated.  Losing it makes that user's vault unreadable.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::errors::{PassVaultError, Result};

use super::keys::VaultKey;

/// Load the key at `path`, generating and persisting a new one if the
/// file does not exist yet.
///
/// The parent directory is created on demand.  On Unix the directory is
/// restricted to the owner and the key file to owner read/write.
pub fn load_or_generate_keyfile(path: &Path) -> Result<VaultKey> {
    if path.exists() {
        return load_keyfile(path);
    }
    generate_keyfile(path)
}

/// Generate a new random key and write it to `path`.
///
/// Fails if a file already exists there so an existing key is never
/// silently replaced.  On Unix the file is created with mode 0600.
pub fn generate_keyfile(path: &Path) -> Result<VaultKey> {
    if let Some(parent) = path.parent() {
        ensure_private_dir(parent)?;
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => PassVaultError::KeyfileError(format!(
            "key file already exists at {}",
            path.display()
        )),
        _ => PassVaultError::Io(e),
    })?;

    let key = VaultKey::generate();
    file.write_all(key.as_bytes())?;
    file.sync_all()?;

    info!(path = %path.display(), "generated new vault key");
    Ok(key)
}

/// Load a key file from disk and validate its length.
pub fn load_keyfile(path: &Path) -> Result<VaultKey> {
    let data = fs::read(path)?;
    let key = VaultKey::from_slice(&data).map_err(|_| {
        PassVaultError::KeyfileError(format!(
            "{} must hold exactly {} bytes, found {}",
            path.display(),
            super::keys::KEY_LEN,
            data.len()
        ))
    })?;
    debug!(path = %path.display(), "loaded vault key");
    Ok(key)
}

/// Create `dir` (and parents) if missing, owner-only on Unix.
pub(crate) fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.exists() {
        return Ok(());
    }

    fs::create_dir_all(dir)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
    }

    debug!(dir = %dir.display(), "created user directory");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn generate_then_load_returns_same_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("alice").join("key.key");

        let generated = generate_keyfile(&path).unwrap();
        let loaded = load_keyfile(&path).unwrap();
        assert_eq!(generated.as_bytes(), loaded.as_bytes());
    }

    #[test]
    fn load_or_generate_is_stable_across_calls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bob").join("key.key");

        let first = load_or_generate_keyfile(&path).unwrap();
        let second = load_or_generate_keyfile(&path).unwrap();
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn generate_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let user_dir = dir.path().join("users").join("carol");
        let path = user_dir.join("key.key");

        generate_keyfile(&path).unwrap();
        assert!(user_dir.is_dir());
        assert_eq!(fs::read(&path).unwrap().len(), 32);
    }

    #[test]
    fn generate_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.key");

        let original = generate_keyfile(&path).unwrap();
        let result = generate_keyfile(&path);

        assert!(matches!(result, Err(PassVaultError::KeyfileError(_))));
        assert_eq!(fs::read(&path).unwrap(), original.as_bytes().to_vec());
    }

    #[test]
    fn load_rejects_wrong_length() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("key.key");
        fs::write(&path, [0u8; 16]).unwrap();

        let result = load_or_generate_keyfile(&path);
        assert!(matches!(result, Err(PassVaultError::KeyfileError(_))));
    }

    #[cfg(unix)]
    #[test]
    fn key_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dave").join("key.key");
        generate_keyfile(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn fresh_key_in_open_directory_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o777)).unwrap();
        let path = dir.path().join("key.key");
        load_or_generate_keyfile(&path).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "no group or other bits on a fresh key file");
    }
}
