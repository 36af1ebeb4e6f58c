//! Diagnostic logging based on `tracing-subscriber`.
//!
//! Logs always go to stderr; stdout belongs to the console exporter.

pub mod config;

pub use config::*;

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber with the given configuration.
///
/// With console output disabled no subscriber is installed and all events
/// are discarded.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    if !config.console.enabled {
        return Ok(());
    }

    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));
    let use_ansi = config.console.colored && std::io::stderr().is_terminal();
    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Full => registry
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().with_ansi(false).json().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}
