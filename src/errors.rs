use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    // --- Key file errors ---
    #[error("Key file error: {0}")]
    KeyfileError(String),

    // --- Vault errors ---
    #[error("Invalid vault format in {}: {reason}", path.display())]
    InvalidVaultFormat { path: PathBuf, reason: String },

    #[error("No matching website found for '{0}'")]
    WebsiteNotFound(String),

    #[error("Invalid website name: {0}")]
    InvalidWebsite(String),

    // --- Account errors ---
    #[error("No username/password match.")]
    InvalidCredentials,

    #[error("Username already exists.")]
    UsernameTaken(String),

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Account directory is corrupted: {0}")]
    InvalidAccountDirectory(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl PassVaultError {
    /// Whether the menu loop can report this error and carry on.
    ///
    /// Everything tied to one user's data or one operator entry is
    /// recoverable; broken I/O, configuration and end of input are not.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::DecryptionFailed
                | Self::KeyfileError(_)
                | Self::InvalidVaultFormat { .. }
                | Self::WebsiteNotFound(_)
                | Self::InvalidWebsite(_)
                | Self::InvalidCredentials
                | Self::UsernameTaken(_)
                | Self::InvalidUsername(_)
        )
    }
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_errors_are_recoverable() {
        assert!(PassVaultError::InvalidCredentials.is_recoverable());
        assert!(PassVaultError::UsernameTaken("alice".into()).is_recoverable());
        assert!(PassVaultError::WebsiteNotFound("example.com".into()).is_recoverable());
        assert!(PassVaultError::DecryptionFailed.is_recoverable());
    }

    #[test]
    fn io_and_cancel_are_fatal() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert!(!PassVaultError::from(io).is_recoverable());
        assert!(!PassVaultError::UserCancelled.is_recoverable());
        assert!(!PassVaultError::ConfigError("bad".into()).is_recoverable());
    }

    #[test]
    fn messages_match_menu_wording() {
        assert_eq!(
            PassVaultError::InvalidCredentials.to_string(),
            "No username/password match."
        );
        assert_eq!(
            PassVaultError::UsernameTaken("bob".into()).to_string(),
            "Username already exists."
        );
    }
}
