//! Logger Module
//!
//! A console logging setup based on `tracing-subscriber` with support for:
//! - Level filtering through `EnvFilter` directives
//! - Full, Compact and JSON output formats
//! - Color control (colors only when stderr is a terminal)
//!
//! Events are written to stderr; stdout is left to the command output.
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary or to the embedding application.

pub mod config;
pub mod error;

// Re-export main types
pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global logger with the given configuration
///
/// # Errors
/// Returns an error if the configuration is invalid or a global subscriber
/// was already installed.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    // Create filter from level string
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let use_ansi = ansi_enabled(config.colored);

    match config.format {
        LogFormat::Full => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true),
            )
            .try_init()?,
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .compact(),
            )
            .try_init()?,
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .json(),
            )
            .try_init()?,
    }

    Ok(())
}

/// Colors are used only when requested and stderr is a terminal
fn ansi_enabled(colored: bool) -> bool {
    colored && std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_rejects_invalid_level() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..LoggerConfig::default()
        };
        assert!(init_logger(config).is_err());
    }

    #[test]
    fn test_ansi_follows_stderr_terminal() {
        assert!(!ansi_enabled(false));
        assert_eq!(ansi_enabled(true), std::io::stderr().is_terminal());
    }
}
