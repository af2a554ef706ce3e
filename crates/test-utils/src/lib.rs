pub mod builders;

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Route `taskgantt` events into the per-test output capture.
///
/// Safe to call from every test; only the first call installs the
/// subscriber. The filter comes from `RUST_LOG` and defaults to `info`, so
/// graph mutations (`debug`) and per-tick simulator decisions (`trace`) stay
/// quiet unless asked for, e.g. `RUST_LOG=taskgantt::sim::simulator=trace`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}
