//! Add Password: store or overwrite the password for a website.

use crate::cli::output;
use crate::cli::{prompt_line, prompt_secret};
use crate::errors::Result;
use crate::session::Session;
use crate::vault::AddOutcome;

/// Execute the `Add Password` menu entry.
pub fn execute(session: &Session) -> Result<()> {
    let website = prompt_line("Enter website name")?;
    let password = prompt_secret("Enter password")?;

    match session.record_store().add(&website, &password)? {
        AddOutcome::Added => output::success("Password added successfully."),
        AddOutcome::Replaced => output::success(&format!(
            "Password for '{}' replaced.",
            website.trim()
        )),
    }

    Ok(())
}
