//! Remove Password: delete one website's entry.

use crate::cli::output;
use crate::cli::prompt_line;
use crate::errors::Result;
use crate::session::Session;

/// Execute the `Remove Password` menu entry.
///
/// An unknown website comes back as `WebsiteNotFound`, which the menu
/// reports without leaving the session.
pub fn execute(session: &Session) -> Result<()> {
    let website = prompt_line("Enter website name to remove password")?;

    session.record_store().remove(&website)?;
    output::success("Password removed successfully.");

    Ok(())
}
