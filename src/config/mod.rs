//! Configuration management module for appnotify
//!
//! The library never reads configuration on its own; `PushClient::new` takes
//! everything explicitly. `ConfigLoader` exists for the binary and for callers
//! who want file and environment driven settings.
//!
//! # Configuration Priority (lowest to highest)
//! 1. Built-in defaults
//! 2. A TOML file (`--config` or `APPNOTIFY_CONFIG_FILE`)
//! 3. `APPNOTIFY_*` environment variables

pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

// Re-export public types
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ApiConfig, CacheSettings, LoggerSettings, Settings};
