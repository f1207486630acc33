//! Diagnostic logging via `tracing`.
//!
//! Events go to stderr so stdout stays clean for `get` output that may be
//! piped into other programs. Secret values are never logged; only keys,
//! service names and vault statuses.

use std::io;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `default_level` is used, raised to
/// `debug` when `verbose` is on. Calling this twice is harmless: the
/// second install is ignored.
pub fn init(default_level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { default_level };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
