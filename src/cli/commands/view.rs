//! View Passwords: decrypt and list every entry.

use crate::cli::output;
use crate::errors::Result;
use crate::session::Session;

/// Execute the `View Passwords` menu entry.
pub fn execute(session: &Session) -> Result<()> {
    let entries = session.record_store().view()?;
    output::print_passwords_table(&entries);
    Ok(())
}
