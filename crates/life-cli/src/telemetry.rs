//! Tracing setup for the command-line tool.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "info";

/// Install a stderr subscriber so stdout only carries the run result
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
