
use std::sync::Once;

use tracing_subscriber::EnvFilter;

static LOGGING: Once = Once::new();

/// Installs a global `tracing` subscriber writing through the test harness. Honors `RUST_LOG` and
/// falls back to `debug`.
pub(crate) fn init_logging() {
    LOGGING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        if let Err(e) = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
        {
            eprintln!("Failed to set up test logging: {e}");
        }
    });
}
