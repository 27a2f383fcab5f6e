//! In-memory handle for a user's vault key.

use rand::RngCore;
use zeroize::Zeroize;

use crate::errors::{PassVaultError, Result};

/// Length of a vault key (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// A wrapper around a 32-byte vault key that automatically zeroes
/// its memory when dropped.
///
/// The key is random, not derived from the account password, so the
/// only thing protecting it at rest is the file it lives in.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct VaultKey {
    bytes: [u8; KEY_LEN],
}

impl VaultKey {
    /// Create a new `VaultKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Generate a fresh key from the thread-local CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::rng().fill_bytes(&mut bytes);
        let key = Self::new(bytes);
        bytes.zeroize();
        key
    }

    /// Build a key from a slice, rejecting anything that is not exactly
    /// `KEY_LEN` bytes long.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let bytes: [u8; KEY_LEN] = data.try_into().map_err(|_| {
            PassVaultError::KeyfileError(format!(
                "key must be exactly {KEY_LEN} bytes, got {}",
                data.len()
            ))
        })?;
        Ok(Self::new(bytes))
    }

    /// Access the raw key bytes (e.g. to pass to encryption).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VaultKey(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_differ() {
        let a = VaultKey::generate();
        let b = VaultKey::generate();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn from_slice_checks_length() {
        assert!(VaultKey::from_slice(&[0u8; KEY_LEN]).is_ok());
        assert!(VaultKey::from_slice(&[0u8; 31]).is_err());
        assert!(VaultKey::from_slice(&[0u8; 44]).is_err());
    }

    #[test]
    fn debug_does_not_leak_bytes() {
        let key = VaultKey::new([0xAB; KEY_LEN]);
        assert_eq!(format!("{key:?}"), "VaultKey(..)");
    }
}
