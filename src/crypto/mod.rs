//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and text tokens (`encryption`)
//! - The zeroizing in-memory vault key (`keys`)
//! - Loading and generating per-user key files (`keyfile`)
//! - Plaintext or Argon2id storage of account secrets (`secret_hash`)

pub mod encryption;
pub mod keyfile;
pub mod keys;
pub mod secret_hash;

pub use encryption::{decrypt, decrypt_token, encrypt, encrypt_token};
pub use keyfile::{generate_keyfile, load_keyfile, load_or_generate_keyfile};
pub use keys::{VaultKey, KEY_LEN};
pub use secret_hash::{seal_secret, verify_secret, SecretStorage};
