//! The interactive menu loops.
//!
//! Top level: Login, Sign Up, Quit.  Once a session is open: View,
//! Add, Remove, Logout.  Recoverable errors are printed and the
//! enclosing menu is shown again; anything else ends the program.

use crate::cli::commands;
use crate::cli::output;
use crate::cli::{prompt_line, Context};
use crate::errors::{PassVaultError, Result};
use crate::session::Session;

const MAIN_OPTIONS: &[&str] = &["Login", "Sign Up", "Quit"];
const USER_OPTIONS: &[&str] = &["View Passwords", "Add Password", "Remove Password", "Logout"];

/// Run the menus until the operator quits or input runs out.
pub fn run(ctx: &Context) -> Result<()> {
    match main_menu(ctx) {
        Err(PassVaultError::UserCancelled) => Ok(()),
        other => other,
    }
}

fn main_menu(ctx: &Context) -> Result<()> {
    loop {
        output::menu("Password Manager Login Menu", MAIN_OPTIONS);
        let choice = prompt_line("Enter your choice")?;

        let opened = match choice.trim() {
            "1" => commands::login::execute(ctx),
            "2" => commands::signup::execute(ctx),
            "3" => {
                output::info("Goodbye!");
                return Ok(());
            }
            _ => {
                output::warning("Invalid choice. Please try again.");
                continue;
            }
        };

        match opened {
            Ok(session) => user_menu(&session)?,
            Err(e) => report(e)?,
        }
    }
}

fn user_menu(session: &Session) -> Result<()> {
    loop {
        output::menu("Password Manager User Menu", USER_OPTIONS);
        let choice = prompt_line("Enter your choice")?;

        let result = match choice.trim() {
            "1" => commands::view::execute(session),
            "2" => commands::add::execute(session),
            "3" => commands::remove::execute(session),
            "4" => {
                output::info("Logging out...");
                return Ok(());
            }
            _ => {
                output::warning("Invalid choice. Please try again.");
                continue;
            }
        };

        if let Err(e) = result {
            report(e)?;
        }
    }
}

/// Print a recoverable error and carry on; hand anything else back.
fn report(e: PassVaultError) -> Result<()> {
    if e.is_recoverable() {
        output::error(&e.to_string());
        Ok(())
    } else {
        Err(e)
    }
}
