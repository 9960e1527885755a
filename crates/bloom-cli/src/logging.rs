//! Log setup for the `bloom` binary.
//!
//! `RUST_LOG` wins when set. Otherwise `-v` flags raise the configured
//! level. Output goes to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Filter directive for the configured level and `-v` count.
pub fn filter_directive(configured: &str, verbose: u8) -> String {
    match verbose {
        0 => configured.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(configured: &str, verbose: u8) {
    let directive = filter_directive(configured, verbose);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&directive))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    tracing::debug!(filter = %directive, "logging initialised");
}
