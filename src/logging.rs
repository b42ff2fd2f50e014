//! Tracing subscriber setup

use std::sync::OnceLock;
use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn,flashback=info,game_state=info,game_ui=info,score_client=warn";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global fmt subscriber
///
/// Idempotent: later calls, or a subscriber installed elsewhere, are ignored.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        fmt().with_env_filter(filter).with_target(false).try_init().ok();
    });
}

/// Quiet subscriber for tests (`TEST_LOG`, then `RUST_LOG`, else `warn`)
pub fn init_for_tests() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt().with_env_filter(filter).with_test_writer().without_time().try_init().ok();
    });
}
