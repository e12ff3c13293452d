//! Logging setup
//!
//! Logs go to stderr so table/JSON output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber; `RUST_LOG` overrides the default filter
pub fn init(verbose: bool) {
    let default_filter = if verbose {
        "anidex=debug,anidex_cli=debug,warn"
    } else {
        "anidex=warn,anidex_cli=info,error"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .init();
}
