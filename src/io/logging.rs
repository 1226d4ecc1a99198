//! Structured logging setup

use tracing_subscriber::EnvFilter;

/// Filter directive for the given verbosity flags
///
/// `quiet` wins over any number of `-v` flags.
pub const fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install a stderr subscriber, honouring `RUST_LOG` over `directive`
///
/// Returns `false` when a global subscriber was already installed.
pub fn init(directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok()
}
