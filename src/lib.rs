//! appnotify
//!
//! Client library for the Push Notifications HTTP API: build a notification,
//! resolve a user's API key from their login, and post the notification.
//!
//! ```ignore
//! use appnotify::config::Settings;
//! use appnotify::{Notification, PushClient, Sound, Urgency};
//!
//! let client = PushClient::from_settings(&Settings::default())?;
//! let mut notification = Notification::new("Important Notice", "Please wash the dishes!");
//! notification.set_urgency(Urgency::High);
//! notification.set_sound(Sound::Sound3);
//! let id = client.send(&notification, "api-key").await?;
//! ```

use shadow_rs::shadow;
shadow!(build);

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{PushError, PushResult};
pub use models::{Notification, Sound, Urgency};
pub use services::{Endpoints, NotificationId, PushClient, UNRESOLVED_NOTIFICATION_ID};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
