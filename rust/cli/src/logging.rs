//! Log output for the `holdem` binary.
//!
//! Events go to stderr so stdout only ever carries command output. The filter
//! defaults to `info` and follows `RUST_LOG` when it is set.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

pub const DEFAULT_FILTER: &str = "info";

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
