//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

const DEBUG_FILTER: &str = "info,mile_end_map=debug";
const DEFAULT_FILTER: &str = "info";

/// Install the global fmt subscriber. `RUST_LOG` overrides the debug-mode default.
pub(crate) fn init(debug: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(debug)
        .try_init();
}

/// Debug mode raises this binary's own events to `debug`; dependencies stay at `info`.
fn default_filter(debug: bool) -> &'static str {
    if debug { DEBUG_FILTER } else { DEFAULT_FILTER }
}
