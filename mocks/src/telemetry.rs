use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_TEST_FILTER: &str = "standin_core=debug,mocks=debug";

/// Install a test-friendly tracing subscriber
///
/// Output goes through the test harness writer so it is captured per test.
/// Fails if a global subscriber is already installed.
pub fn try_init_test_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_TEST_FILTER))
        .context("Invalid log level configuration")?;

    let fmt_layer = fmt::layer()
        .compact()
        .with_test_writer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(filter = DEFAULT_TEST_FILTER, "Test tracing initialized");
    Ok(())
}

/// Install the test subscriber once; later calls are no-ops
pub fn init_test_tracing() {
    let _ = try_init_test_tracing();
}
