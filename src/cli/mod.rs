//! CLI module for appnotify
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing with clap
//! - Settings loading with CLI overrides
//! - Command execution

pub mod executor;
pub mod parser;

// Re-export public types for convenience
pub use executor::execute_command;
pub use parser::{Cli, Commands, CredentialArgs, Recipient, SendArgs, SoundArg, UrgencyArg};

use crate::config::{ConfigLoader, Settings};
use crate::logger::init_logger;

/// Load settings, honouring `--config`
///
/// # Errors
/// Returns error if the configuration file is missing or invalid
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = &cli.config {
        loader = loader.with_file(path);
    }
    Ok(loader.load()?)
}

/// Initialize logger from settings, applying `--verbose` / `--quiet`
///
/// # Errors
/// Returns error if logger initialization fails
pub fn init_logger_from_settings(settings: &Settings, cli: &Cli) -> anyhow::Result<()> {
    let mut logger_config = settings.logger.clone().into_logger_config()?;
    if let Some(level) = cli.log_level_override() {
        logger_config = logger_config.with_level(level);
    }
    init_logger(logger_config)
}
