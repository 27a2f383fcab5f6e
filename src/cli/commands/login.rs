//! Login: check credentials and open a session.

use crate::cli::output;
use crate::cli::{prompt_line, prompt_secret, Context};
use crate::errors::Result;
use crate::session::Session;

/// Execute the `Login` menu entry.
pub fn execute(ctx: &Context) -> Result<Session> {
    let username = prompt_line("Enter username")?;
    let password = prompt_secret("Enter password")?;

    let session = Session::login(
        &ctx.directory,
        &ctx.settings,
        &ctx.root,
        &username,
        &password,
    )?;

    output::success(&format!("Logged in as {}.", session.username()));
    Ok(session)
}
