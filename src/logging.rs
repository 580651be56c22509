//! Tracing setup for the command-line binary.
//!
//! Logs go to stderr so the report on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Initialize tracing, filtered by `RUST_LOG` (default: `warn`).
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
