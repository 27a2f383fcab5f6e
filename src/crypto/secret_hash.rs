//! Storage form of account secrets in `users.json`.
//!
//! Accounts have historically been stored with the secret in the clear.
//! New registrations can instead store an Argon2id PHC string
//! (`$argon2id$v=19$...`).  Verification accepts either form so a
//! directory can hold a mix of both.
//!
//! A stored value that parses as an Argon2 PHC string is always a hash.
//! Plaintext storage therefore hashes any secret that would itself parse
//! as one, so such a secret never verifies against its own preimage.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::errors::{PassVaultError, Result};

/// How newly registered account secrets are written to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretStorage {
    /// Store the secret verbatim (compatible with existing directories).
    #[default]
    Plaintext,
    /// Store an Argon2id hash with a random salt.
    Argon2,
}

/// Turn a secret into the string that gets stored for the account.
pub fn seal_secret(storage: SecretStorage, secret: &str) -> Result<String> {
    match storage {
        SecretStorage::Plaintext if parse_argon2(secret).is_none() => Ok(secret.to_string()),
        SecretStorage::Plaintext | SecretStorage::Argon2 => hash_secret(secret),
    }
}

fn hash_secret(secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| PassVaultError::HashingFailed(e.to_string()))?;
    Ok(hash.to_string())
}

/// Check `candidate` against a stored secret in either form.
pub fn verify_secret(stored: &str, candidate: &str) -> bool {
    if let Some(hash) = parse_argon2(stored) {
        return Argon2::default()
            .verify_password(candidate.as_bytes(), &hash)
            .is_ok();
    }

    stored.as_bytes().ct_eq(candidate.as_bytes()).into()
}

/// A stored value counts as hashed only if it parses as an Argon2 PHC string.
fn parse_argon2(stored: &str) -> Option<PasswordHash<'_>> {
    if !stored.starts_with("$argon2") {
        return None;
    }
    PasswordHash::new(stored).ok()
}
