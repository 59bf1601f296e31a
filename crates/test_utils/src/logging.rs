//! Test Logging Setup
//!
//! Installs a `tracing` subscriber that writes through the test harness so
//! engine logs show up only for failing tests. Filtering follows `RUST_LOG`
//! and defaults to `debug` for the workspace crates.

use once_cell::sync::Lazy;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,domain_nav=debug,infra_ingest=debug"));

    // Another harness may have installed a global subscriber already
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_test_writer().with_target(true))
        .try_init();
});

/// Initializes tracing for tests; safe to call from every test
pub fn init_test_tracing() {
    Lazy::force(&TRACING);
}
