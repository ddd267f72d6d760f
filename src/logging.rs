//! Tracing subscriber initialization.
//!
//! Hosts embedding the library call [`init`] once at startup; the filter and
//! output format come from [`LoggingConfig`]. Access events carry the
//! `access` target so hosts can route them to a separate sink.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global tracing subscriber.
///
/// Safe to call once per process; a second call is a no-op with a warning
/// instead of a panic.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter)
        .unwrap_or_else(|_| EnvFilter::new("mvc_core=info"));

    let result = if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
    };

    if result.is_err() {
        tracing::warn!("logging already initialized");
    }
}
