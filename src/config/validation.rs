//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use url::Url;

use crate::config::error::ConfigError;
use crate::config::settings::{ApiConfig, LoggerSettings, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Valid log formats
const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ApiConfig {
    /// Validate API configuration
    ///
    /// # Validation Rules
    /// - Both endpoint URLs must parse and use https
    /// - Timeouts must be greater than 0
    /// - User agent must not be empty
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_https_url("api.notifications_url", &self.notifications_url)?;
        validate_https_url("api.user_session_url", &self.user_session_url)?;

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "api.timeout_seconds",
                "Request timeout must be greater than 0 seconds.",
            ));
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "api.connect_timeout_seconds",
                "Connect timeout must be greater than 0 seconds.",
            ));
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::validation(
                "api.user_agent",
                "User agent must not be empty.",
            ));
        }

        Ok(())
    }
}

fn validate_https_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value).map_err(|e| ConfigError::ValidationError {
        field: field.to_string(),
        message: format!("Invalid URL '{}': {}", value, e),
    })?;

    if url.scheme() != "https" {
        return Err(ConfigError::ValidationError {
            field: field.to_string(),
            message: format!("URL '{}' must use https.", value),
        });
    }

    Ok(())
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Log level must be one of: trace, debug, info, warn, error
    /// - Log format must be one of: full, compact, json
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            });
        }

        if !VALID_LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            });
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all configuration settings
    ///
    /// Returns the first validation error encountered.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
