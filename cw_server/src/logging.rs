//! Logging initialization.
//!
//! Request-scoped events are tagged with a correlation id by the request
//! middleware; this module only wires up the subscriber they flow through.

use tracing_subscriber::EnvFilter;

/// Initialize logging for the process.
///
/// Honors `RUST_LOG`; without it the service logs at `info` while the
/// noisier dependencies (sqlx, hyper) are held to `warn`. Safe to call more
/// than once; later calls are no-ops.
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,hyper=warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .try_init();
}
