//! Integration tests for the account directory.

use std::fs;

use passvault::accounts::AccountDirectory;
use passvault::crypto::{seal_secret, SecretStorage};
use passvault::errors::PassVaultError;
use tempfile::TempDir;

fn directory(storage: SecretStorage) -> (TempDir, AccountDirectory) {
    let dir = TempDir::new().expect("create temp dir");
    let accounts = AccountDirectory::new(dir.path().join("users.json"), storage);
    (dir, accounts)
}

#[test]
fn register_then_authenticate() {
    let (_dir, accounts) = directory(SecretStorage::Plaintext);

    accounts.register("alice", "pw1").unwrap();

    assert!(accounts.authenticate("alice", "pw1").unwrap());
    assert!(!accounts.authenticate("alice", "wrong").unwrap());
}

#[test]
fn second_registration_fails_and_keeps_original_secret() {
    let (_dir, accounts) = directory(SecretStorage::Plaintext);

    accounts.register("alice", "pw1").unwrap();
    let result = accounts.register("alice", "anything");

    assert!(matches!(result, Err(PassVaultError::UsernameTaken(ref u)) if u == "alice"));
    assert!(accounts.authenticate("alice", "pw1").unwrap());
    assert!(!accounts.authenticate("alice", "anything").unwrap());
}

#[test]
fn usernames_are_case_sensitive() {
    let (_dir, accounts) = directory(SecretStorage::Plaintext);

    accounts.register("alice", "pw").unwrap();
    accounts.register("Alice", "other").unwrap();

    assert!(!accounts.authenticate("ALICE", "pw").unwrap());
    assert!(accounts.authenticate("Alice", "other").unwrap());
}

#[test]
fn missing_or_blank_file_is_empty_directory() {
    let (dir, accounts) = directory(SecretStorage::Plaintext);

    assert!(!accounts.authenticate("nobody", "pw").unwrap());
    assert!(!accounts.contains("nobody").unwrap());

    fs::write(dir.path().join("users.json"), "").unwrap();
    assert!(!accounts.authenticate("nobody", "pw").unwrap());

    accounts.register("first", "pw").unwrap();
    assert!(accounts.contains("first").unwrap());
}

#[test]
fn plaintext_mode_writes_flat_json_map() {
    let (dir, accounts) = directory(SecretStorage::Plaintext);

    accounts.register("bob", "secret").unwrap();

    let raw = fs::read_to_string(dir.path().join("users.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed, serde_json::json!({ "bob": "secret" }));
}

#[test]
fn reads_directory_written_by_hand() {
    let (dir, accounts) = directory(SecretStorage::Plaintext);
    fs::write(
        dir.path().join("users.json"),
        r#"{"carol": "pw-c", "dave": "pw-d"}"#,
    )
    .unwrap();

    assert!(accounts.authenticate("carol", "pw-c").unwrap());
    assert!(accounts.authenticate("dave", "pw-d").unwrap());
    assert!(matches!(
        accounts.register("dave", "x"),
        Err(PassVaultError::UsernameTaken(_))
    ));
}

#[test]
fn corrupted_directory_is_reported() {
    let (dir, accounts) = directory(SecretStorage::Plaintext);
    fs::write(dir.path().join("users.json"), "{not json").unwrap();

    assert!(matches!(
        accounts.authenticate("x", "y"),
        Err(PassVaultError::InvalidAccountDirectory(_))
    ));
}

#[test]
fn argon2_mode_does_not_store_secret_in_clear() {
    let (dir, accounts) = directory(SecretStorage::Argon2);

    accounts.register("erin", "hunter2").unwrap();

    let raw = fs::read_to_string(dir.path().join("users.json")).unwrap();
    assert!(!raw.contains("hunter2"));
    assert!(accounts.authenticate("erin", "hunter2").unwrap());
    assert!(!accounts.authenticate("erin", "hunter3").unwrap());
}

#[test]
fn switching_modes_keeps_existing_accounts_working() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("users.json");

    AccountDirectory::new(&path, SecretStorage::Plaintext)
        .register("old", "legacy")
        .unwrap();

    let hashed = AccountDirectory::new(&path, SecretStorage::Argon2);
    hashed.register("new", "modern").unwrap();

    assert!(hashed.authenticate("old", "legacy").unwrap());
    assert!(hashed.authenticate("new", "modern").unwrap());

    let plain = AccountDirectory::new(&path, SecretStorage::Plaintext);
    assert!(plain.authenticate("new", "modern").unwrap());
}

#[test]
fn hash_shaped_secret_only_matches_itself() {
    let (dir, accounts) = directory(SecretStorage::Plaintext);
    let lookalike = seal_secret(SecretStorage::Argon2, "x").unwrap();

    accounts.register("mallory", &lookalike).unwrap();

    assert!(accounts.authenticate("mallory", &lookalike).unwrap());
    assert!(!accounts.authenticate("mallory", "x").unwrap());

    let raw = fs::read_to_string(dir.path().join("users.json")).unwrap();
    assert!(!raw.contains(lookalike.as_str()));
}

#[test]
fn register_rejects_unsafe_usernames() {
    let (dir, accounts) = directory(SecretStorage::Plaintext);

    for name in ["", "..", "a/b", "tab\there"] {
        assert!(matches!(
            accounts.register(name, "pw"),
            Err(PassVaultError::InvalidUsername(_))
        ));
    }
    assert!(!dir.path().join("users.json").exists());
}
