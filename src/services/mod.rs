pub mod push_client;

pub use push_client::{Endpoints, NotificationId, PushClient, UNRESOLVED_NOTIFICATION_ID};
