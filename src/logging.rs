//! Log setup: all levels go to stderr so stdout stays reserved for the
//! wrapped program.

use std::env;
use std::io;

use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber. `DEBUG_LOG=true` enables debug lines;
/// anything else leaves the level at info.
pub fn init() {
    let level = if debug_enabled() { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(io::stderr)
        .init();
}

fn debug_enabled() -> bool {
    env::var("DEBUG_LOG").map(|value| value == "true").unwrap_or(false)
}
