//! Tracing subscriber setup for the binary.

use std::io;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LogConfig, LogFormat};

/// Installs the global subscriber, writing to stdout.
///
/// `RUST_LOG` takes precedence over the configured filter. Calling this more
/// than once is harmless: later calls leave the first subscriber in place.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stdout);

    let _ = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
