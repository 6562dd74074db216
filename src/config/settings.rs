//! Configuration settings structures for appnotify
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{LogFormat, LoggerConfig};

pub const DEFAULT_NOTIFICATIONS_URL: &str =
    "https://www.appnotifications.com/account/notifications.xml";
pub const DEFAULT_USER_SESSION_URL: &str = "https://www.appnotifications.com/user_session.xml";

// ============================================================================
// Default value functions
// ============================================================================

fn default_notifications_url() -> String {
    DEFAULT_NOTIFICATIONS_URL.to_string()
}

fn default_user_session_url() -> String {
    DEFAULT_USER_SESSION_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("appnotify/{}", crate::pkg_version())
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "full".to_string()
}

fn default_true() -> bool {
    true
}

// ============================================================================
// API Configuration
// ============================================================================

/// Push Notifications API endpoints and HTTP client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Endpoint notifications are posted to
    #[serde(default = "default_notifications_url")]
    pub notifications_url: String,

    /// Endpoint used to resolve an API key from email and password
    #[serde(default = "default_user_session_url")]
    pub user_session_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            notifications_url: default_notifications_url(),
            user_session_url: default_user_session_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// ============================================================================
// Cache Configuration
// ============================================================================

/// Credentials cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Whether resolved API keys are cached
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Whether to use colored output on a terminal
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            colored: default_true(),
        }
    }
}

impl LoggerSettings {
    /// Convert LoggerSettings to the runtime LoggerConfig
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.format".to_string(),
                message: e.to_string(),
            })?;

        LoggerConfig::new(self.level, format, self.colored).map_err(|e| {
            ConfigError::ValidationError {
                field: "logger".to_string(),
                message: e.to_string(),
            }
        })
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete client settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// API endpoints and HTTP client
    #[serde(default)]
    pub api: ApiConfig,

    /// Credentials cache
    #[serde(default)]
    pub cache: CacheSettings,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}
