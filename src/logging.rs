//! Logging setup
//!
//! Hosts call [`init`] once at startup; `RUST_LOG` overrides the default
//! filter. Safe to call more than once (later calls are no-ops).

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize tracing with the given default filter (e.g. "info")
pub fn init_with_filter(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init so embedding hosts that already installed a subscriber win
    let _ = fmt().with_env_filter(filter).try_init();
}

/// Initialize tracing at `info` level
pub fn init() {
    init_with_filter("info");
}
