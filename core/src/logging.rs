//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "api_harness=info";

/// Install a fmt subscriber writing through the test harness's captured
/// output. `RUST_LOG` overrides the default filter. Safe to call repeatedly;
/// only the first call installs anything.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init()
        .is_err()
    {
        tracing::trace!("tracing subscriber already installed");
    }
}
