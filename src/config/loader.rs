//! Configuration loader for appnotify
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for a configuration file
const CONFIG_FILE_ENV: &str = "APPNOTIFY_CONFIG_FILE";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "APPNOTIFY";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

type Builder = config::ConfigBuilder<config::builder::DefaultState>;

/// Configuration loader that handles layered configuration loading
///
/// Sources, in order of priority:
/// 1. Built-in defaults
/// 2. The configuration file, if one was given (must exist)
/// 3. `APPNOTIFY_*` environment variables (highest priority)
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Configuration file path
    config_file: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// Picks up a configuration file from `APPNOTIFY_CONFIG_FILE` when set.
    pub fn new() -> Self {
        let config_file = std::env::var(CONFIG_FILE_ENV)
            .ok()
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);

        Self { config_file }
    }

    /// Use `path` as the configuration file, overriding `APPNOTIFY_CONFIG_FILE`
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Get the configuration file path
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Load configuration from all sources
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the configuration file was given but does not exist
    /// - configuration parsing fails
    /// - configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        tracing::debug!(
            config_file = ?self.config_file,
            notifications_url = %settings.api.notifications_url,
            "Configuration loaded"
        );

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let mut builder = Config::builder();

        if let Some(ref config_file) = self.config_file {
            builder = Self::add_file_source(builder, config_file)?;
        }

        // APPNOTIFY_API__TIMEOUT_SECONDS -> api.timeout_seconds
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    fn add_file_source(builder: Builder, path: &Path) -> Result<Builder, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(true),
        ))
    }

    /// Add environment variable source to the config builder
    ///
    /// Examples:
    /// - `APPNOTIFY_API__TIMEOUT_SECONDS` -> `api.timeout_seconds`
    /// - `APPNOTIFY_CACHE__ENABLED` -> `cache.enabled`
    fn add_env_source(builder: Builder) -> Builder {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}
