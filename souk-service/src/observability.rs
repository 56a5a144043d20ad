//! Tracing initialization

use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initialize JSON-formatted tracing from the configured log level.
///
/// The `RUST_LOG`-style filter syntax is accepted in
/// `config.service.log_level`; an invalid filter falls back to `info`. A
/// second call is a no-op, so tests can initialize freely.
pub fn init_tracing(config: &Config) {
    let log_level = config.service.log_level.clone();

    let _ = tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();

    tracing::info!("Tracing initialized for service: {}", config.service.name);
}
