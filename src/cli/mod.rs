//! CLI module: Clap argument parser, prompts, output helpers, menus and
//! command implementations.

pub mod commands;
pub mod menu;
pub mod output;

use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::accounts::AccountDirectory;
use crate::config::Settings;
use crate::errors::{PassVaultError, Result};

/// PassVault CLI: local per-user encrypted password vault.
#[derive(Parser)]
#[command(
    name = "passvault",
    about = "Local per-user encrypted password vault",
    version
)]
pub struct Cli {
    /// Directory holding users.json and the users/ folder
    #[arg(long, env = "PASSVAULT_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Log verbosity (-v, -vv, -vvv); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Everything the menus need that outlives a single session.
pub struct Context {
    pub root: PathBuf,
    pub settings: Settings,
    pub directory: AccountDirectory,
}

impl Context {
    /// Load settings for `root` and make sure the users folder exists.
    pub fn new(root: PathBuf) -> Result<Self> {
        let settings = Settings::load(&root)?;

        let users_dir = settings.users_dir_path(&root);
        if !users_dir.exists() {
            fs::create_dir_all(&users_dir)?;
        }

        let directory =
            AccountDirectory::new(settings.users_file_path(&root), settings.secret_storage);

        Ok(Self {
            root,
            settings,
            directory,
        })
    }

    /// Build the context from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        Self::new(cli.root.clone())
    }
}

// ---------------------------------------------------------------------------
// Prompts
// ---------------------------------------------------------------------------
//
// On a terminal we go through dialoguer (secrets are not echoed).  When
// stdin is piped we read plain lines so the menus can be scripted.
// End of input surfaces as `UserCancelled`.

/// Ask for one line of visible input.
pub fn prompt_line(prompt: &str) -> Result<String> {
    if io::stdin().is_terminal() {
        return dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| PassVaultError::CommandFailed(format!("input prompt: {e}")));
    }
    read_piped_line(prompt)
}

/// Ask for a secret without echoing it.
///
/// Returns `Zeroizing<String>` so the secret is wiped from memory on drop.
pub fn prompt_secret(prompt: &str) -> Result<Zeroizing<String>> {
    if io::stdin().is_terminal() {
        let secret = dialoguer::Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(|e| PassVaultError::CommandFailed(format!("password prompt: {e}")))?;
        return Ok(Zeroizing::new(secret));
    }
    read_piped_line(prompt).map(Zeroizing::new)
}

fn read_piped_line(prompt: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{prompt}: ")?;
    stderr.flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(PassVaultError::UserCancelled);
    }
    writeln!(stderr)?;

    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}
