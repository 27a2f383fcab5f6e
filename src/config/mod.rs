//! Configuration: optional `.passvault.toml` in the vault root.

pub mod settings;

pub use settings::Settings;
