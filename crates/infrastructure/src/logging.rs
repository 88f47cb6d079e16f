//! Tracing subscriber setup.
//!
//! Scenario binaries and tests call [`init_tracing`] first; later calls are
//! no-ops, so every test can call it. `RUST_LOG` overrides the default
//! `info` filter.

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

static INIT: Once = Once::new();

/// Installs the global subscriber with the default filter.
pub fn init_tracing() {
    init_tracing_with(DEFAULT_FILTER);
}

/// Installs the global subscriber, falling back to `filter` when `RUST_LOG`
/// is unset or invalid.
///
/// Output goes through the test writer so `cargo test` captures it per test.
pub fn init_tracing_with(filter: &str) {
    INIT.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
        // Another subscriber may already be installed by the host process.
        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_test_writer())
            .try_init();
    });
}
