//! Diagnostic logging setup.
//!
//! Events go to stderr so they never mix with menu output on stdout.
//! `RUST_LOG` takes precedence; otherwise the level follows `-v`.

use tracing_subscriber::EnvFilter;

/// Map a `-v` count to a default filter directive.
fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.  Calling it twice is harmless.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
