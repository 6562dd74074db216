//! Data models for push notifications.

pub mod notification;

pub use notification::{Notification, Sound, Urgency};
