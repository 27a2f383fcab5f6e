//! On-disk vault file format.
//!
//! A `<username>_passwords.db` file holds exactly one text token (see
//! `crypto::encryption`).  Opening the token with the user's key yields
//! a JSON object mapping each website to *its own* token:
//!
//! ```text
//! file  = token(key, json)
//! json  = { "example.com": token(key, "hunter2"), ... }
//! ```
//!
//! An absent or blank file is an empty vault.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::record::RecordMap;
use crate::crypto::encryption::{decrypt_token, encrypt_token};
use crate::crypto::VaultKey;
use crate::errors::{PassVaultError, Result};

/// Read and decrypt the vault file at `path`.
///
/// Returns an empty map when the file is missing or holds only
/// whitespace.  Any other content must be a token that opens with
/// `key` and contains a JSON object of website -> token.
pub fn read_vault(path: &Path, key: &VaultKey) -> Result<RecordMap> {
    if !path.exists() {
        debug!(path = %path.display(), "no vault file yet");
        return Ok(RecordMap::new());
    }

    let data = fs::read(path)?;
    let text = std::str::from_utf8(&data).map_err(|_| PassVaultError::DecryptionFailed)?;
    let token = text.trim();
    if token.is_empty() {
        return Ok(RecordMap::new());
    }

    let json = decrypt_token(key.as_bytes(), token)?;
    let records: RecordMap =
        serde_json::from_slice(&json).map_err(|e| PassVaultError::InvalidVaultFormat {
            path: path.to_path_buf(),
            reason: format!("records JSON: {e}"),
        })?;

    debug!(path = %path.display(), records = records.len(), "loaded vault");
    Ok(records)
}

/// Encrypt `records` as a single token and write it to `path`.
pub fn write_vault(path: &Path, key: &VaultKey, records: &RecordMap) -> Result<()> {
    let json = serde_json::to_vec(records)
        .map_err(|e| PassVaultError::SerializationError(format!("records: {e}")))?;
    let token = encrypt_token(key.as_bytes(), &json)?;

    write_atomic(path, token.as_bytes())?;
    debug!(path = %path.display(), records = records.len(), "saved vault");
    Ok(())
}

/// Write `bytes` to `path` **atomically**.
///
/// The data goes to a temp file in the same directory which is then
/// renamed over the target, so readers see either the old file or the
/// new one, never a half-written mix.  The file is owner-only on Unix.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    if !parent.as_os_str().is_empty() && !parent.exists() {
        fs::create_dir_all(parent)?;
    }

    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, bytes)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}
