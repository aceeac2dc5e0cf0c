//! Optional `tracing` subscriber for embedders without their own.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives, e.g. `lwpc_layout=trace`.
pub const LOG_ENV: &str = "LWPC_LOG";

/// Install a formatting subscriber filtered by [`LOG_ENV`] (default `info`).
///
/// Returns false when a global subscriber was already installed.
pub fn init() -> bool {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
