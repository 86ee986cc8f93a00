//! Telemetry and Observability
//!
//! Sets up `tracing-subscriber` for the whole binary. The filter level is
//! resolved in priority order: `RUST_LOG` env var, then the `--log` flag or
//! config value passed in, then "info". Debug builds log pretty terminal
//! output; release builds log JSON with span context for ingestion.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber at the given level.
///
/// Safe to call more than once; later calls are no-ops, so the binary can
/// init early with defaults and re-init once config is loaded.
pub fn init(log_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},commitreach={log_level}")));

    let registry = tracing_subscriber::registry().with(env_filter);

    if cfg!(debug_assertions) {
        registry
            .with(fmt::layer().pretty().with_target(false))
            .try_init()
            .ok();
    } else {
        registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .ok();
    }
}

/// Initialize at "info" before configuration is available.
pub fn init_default() {
    init("info");
}
