//! Logging configuration.
//!
//! The library only emits `tracing` events. Binaries call [`init_logging`] once
//! to install a stderr subscriber so stdout stays reserved for JSON output.
//!
//! ## Level priority
//!
//! 1. Explicit level (CLI `--log-level` or the config file's `log_level`)
//! 2. `RUST_LOG` environment variable
//! 3. Default: `warn`
//!
//! A level of `off` skips installing a subscriber.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Build the filter for an optional explicit level
fn build_filter(level: Option<&str>) -> EnvFilter {
    match level {
        Some(level) => EnvFilter::new(format!("resmon={}", level.to_lowercase())),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("resmon=warn")),
    }
}

/// Install the stderr subscriber
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_logging(level: Option<&str>) {
    LOGGING_INITIALIZED.get_or_init(|| {
        if level.is_some_and(|l| l.eq_ignore_ascii_case("off")) {
            return;
        }

        let layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

        // Another subscriber may already be installed by the embedding program
        let _ = tracing_subscriber::registry().with(build_filter(level)).with(layer).try_init();
    });
}
