//! Push Notifications API client.
//!
//! Resolves API keys from user logins and sends notifications. Every call is
//! a single request/response round trip with no retries; callers decide
//! whether to try again.

use std::sync::Arc;

use crate::cache::{ApiKeyCache, cache_from_settings};
use crate::config::settings::{
    ApiConfig, DEFAULT_NOTIFICATIONS_URL, DEFAULT_USER_SESSION_URL, Settings,
};
use crate::error::{PushError, PushResult};
use crate::external::{FormParams, HttpTransport, Transport};
use crate::models::Notification;
use crate::utils::text_between;

const PARAM_SESSION_EMAIL: &str = "user_session[email]";
const PARAM_SESSION_PASSWORD: &str = "user_session[password]";

const TOKEN_OPEN: &str = "<single-access-token>";
const TOKEN_CLOSE: &str = "</single-access-token>";
const ERROR_OPEN: &str = "<ERROR>";
const ERROR_CLOSE: &str = "</ERROR>";
const ID_OPEN: &str = "<id type=\"integer\">";
const ID_CLOSE: &str = "</id>";

/// Identifier the API assigns to a sent notification
pub type NotificationId = i64;

/// Returned by a send whose response carried no usable notification id.
///
/// This is not an error: the notification may well have been delivered.
pub const UNRESOLVED_NOTIFICATION_ID: NotificationId = -1;

/// API endpoint URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub notifications: String,
    pub user_session: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            notifications: DEFAULT_NOTIFICATIONS_URL.to_string(),
            user_session: DEFAULT_USER_SESSION_URL.to_string(),
        }
    }
}

impl From<&ApiConfig> for Endpoints {
    fn from(config: &ApiConfig) -> Self {
        Self {
            notifications: config.notifications_url.clone(),
            user_session: config.user_session_url.clone(),
        }
    }
}

/// Client for the Push Notifications HTTP API
///
/// Cheap to clone; clones share the transport and the credentials cache.
///
/// # Example
/// ```ignore
/// let client = PushClient::from_settings(&Settings::default())?;
///
/// let mut notification = Notification::with_action_label("Important Notice", "Please wash the dishes!", "view");
/// notification.set_urgency(Urgency::High);
///
/// let id = client.send_with_credentials(&notification, "jane@example.com", "secret").await?;
/// ```
#[derive(Clone)]
pub struct PushClient {
    transport: Arc<dyn Transport>,
    cache: Arc<dyn ApiKeyCache>,
    endpoints: Endpoints,
}

impl PushClient {
    /// Creates a client from its parts
    ///
    /// # Arguments
    /// * `transport` - Performs the form POSTs
    /// * `cache` - Credentials cache; pass the same `Arc` to several clients to share it
    /// * `endpoints` - Session and notification URLs
    pub fn new(
        transport: Arc<dyn Transport>,
        cache: Arc<dyn ApiKeyCache>,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            transport,
            cache,
            endpoints,
        }
    }

    /// Creates a client with an HTTP transport and the cache selected by `settings`
    pub fn from_settings(settings: &Settings) -> PushResult<Self> {
        let transport = HttpTransport::from_config(&settings.api)?;
        Ok(Self::new(
            Arc::new(transport),
            cache_from_settings(&settings.cache),
            Endpoints::from(&settings.api),
        ))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn cache(&self) -> &Arc<dyn ApiKeyCache> {
        &self.cache
    }

    /// Resolves the API key of a registered user.
    ///
    /// A key already resolved for `email` is served from the cache without a
    /// network call. Otherwise the user session endpoint is asked for the
    /// key, which is cached on success.
    ///
    /// # Errors
    /// - `PushError::Transport` if the request fails
    /// - `PushError::ApiKeyRejected` if the API answered with an error message
    /// - `PushError::ApiKeyUnresolved` if the answer held neither key nor error
    pub async fn resolve_api_key(&self, email: &str, password: &str) -> PushResult<String> {
        if let Some(api_key) = self.cache.get(email).await? {
            tracing::debug!(email = %email, "Using cached API key");
            return Ok(api_key);
        }

        let mut params = FormParams::new();
        params.insert(PARAM_SESSION_EMAIL.to_string(), email.to_string());
        params.insert(PARAM_SESSION_PASSWORD.to_string(), password.to_string());

        let response = self
            .transport
            .post_form(&self.endpoints.user_session, &params)
            .await?;

        let api_key = text_between(&response, TOKEN_OPEN, TOKEN_CLOSE);
        if api_key.is_empty() {
            let upstream = text_between(&response, ERROR_OPEN, ERROR_CLOSE);
            if !upstream.is_empty() {
                tracing::warn!(email = %email, error = %upstream, "API key resolution rejected");
                return Err(PushError::ApiKeyRejected {
                    email: email.to_string(),
                    message: upstream.to_string(),
                });
            }
            tracing::warn!(email = %email, "API key missing from session response");
            return Err(PushError::ApiKeyUnresolved {
                email: email.to_string(),
            });
        }

        self.cache.insert(email, api_key).await?;
        tracing::info!(email = %email, "Resolved API key");

        Ok(api_key.to_string())
    }

    /// Sends `notification` to the user owning `api_key`.
    ///
    /// # Returns
    /// The id of the sent notification, or [`UNRESOLVED_NOTIFICATION_ID`] when
    /// the response carries no numeric id.
    pub async fn send(
        &self,
        notification: &Notification,
        api_key: &str,
    ) -> PushResult<NotificationId> {
        let params = notification.form_params(api_key);
        let response = self
            .transport
            .post_form(&self.endpoints.notifications, &params)
            .await?;

        let id = parse_notification_id(&response);
        if id == UNRESOLVED_NOTIFICATION_ID {
            tracing::warn!(title = %notification.title(), "No notification id in send response");
        } else {
            tracing::info!(id, title = %notification.title(), "Sent notification");
        }

        Ok(id)
    }

    /// Resolves the API key for `email` and sends `notification` with it.
    ///
    /// Resolution errors are returned unchanged.
    pub async fn send_with_credentials(
        &self,
        notification: &Notification,
        email: &str,
        password: &str,
    ) -> PushResult<NotificationId> {
        let api_key = self.resolve_api_key(email, password).await?;
        self.send(notification, &api_key).await
    }

    /// Sends `notification` to every key in `api_keys`, one after another.
    ///
    /// A failure for one recipient does not stop the others.
    ///
    /// # Returns
    /// One result per key, in the order of `api_keys`
    pub async fn send_to_many<S: AsRef<str>>(
        &self,
        notification: &Notification,
        api_keys: &[S],
    ) -> Vec<PushResult<NotificationId>> {
        let mut results = Vec::with_capacity(api_keys.len());
        for api_key in api_keys {
            results.push(self.send(notification, api_key.as_ref()).await);
        }
        results
    }
}

impl std::fmt::Debug for PushClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushClient")
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

/// Reads the notification id out of a send response
fn parse_notification_id(response: &str) -> NotificationId {
    text_between(response, ID_OPEN, ID_CLOSE)
        .parse()
        .unwrap_or(UNRESOLVED_NOTIFICATION_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryApiKeyCache, NoOpApiKeyCache};
    use crate::external::mock::{MockTransport, transport_error};
    use crate::models::{Sound, Urgency};

    const TOKEN_RESPONSE: &str =
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\r<user-session>\r  <single-access-token>ABC123</single-access-token>\r</user-session>\r";
    const ID_RESPONSE: &str =
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\r<notification>\r  <id type=\"integer\">42</id>\r</notification>\r";

    fn client_with(transport: Arc<MockTransport>) -> PushClient {
        PushClient::new(
            transport,
            Arc::new(MemoryApiKeyCache::new()),
            Endpoints::default(),
        )
    }

    #[test]
    fn test_parse_notification_id() {
        assert_eq!(parse_notification_id("<id type=\"integer\">42</id>"), 42);
        assert_eq!(parse_notification_id(ID_RESPONSE), 42);
        assert_eq!(parse_notification_id("<ok/>"), UNRESOLVED_NOTIFICATION_ID);
        assert_eq!(
            parse_notification_id("<id type=\"integer\">forty-two</id>"),
            UNRESOLVED_NOTIFICATION_ID
        );
        assert_eq!(
            parse_notification_id("<id type=\"integer\"></id>"),
            UNRESOLVED_NOTIFICATION_ID
        );
    }

    #[test]
    fn test_endpoints_from_config() {
        let config = ApiConfig {
            notifications_url: "https://push.example.com/n.xml".to_string(),
            user_session_url: "https://push.example.com/s.xml".to_string(),
            ..ApiConfig::default()
        };
        let endpoints = Endpoints::from(&config);
        assert_eq!(endpoints.notifications, "https://push.example.com/n.xml");
        assert_eq!(endpoints.user_session, "https://push.example.com/s.xml");
    }

    #[tokio::test]
    async fn test_resolve_api_key_posts_credentials() {
        let transport = Arc::new(MockTransport::with_responses([TOKEN_RESPONSE]));
        let client = client_with(transport.clone());

        let api_key = client
            .resolve_api_key("jane@example.com", "s3cret & co")
            .await
            .unwrap();

        assert_eq!(api_key, "ABC123");
        let posts = transport.posts();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, DEFAULT_USER_SESSION_URL);
        assert_eq!(posts[0].params.len(), 2);
        assert_eq!(posts[0].params[PARAM_SESSION_EMAIL], "jane@example.com");
        assert_eq!(posts[0].params[PARAM_SESSION_PASSWORD], "s3cret & co");
    }

    #[tokio::test]
    async fn test_resolve_api_key_is_cached() {
        let transport = Arc::new(MockTransport::with_responses([TOKEN_RESPONSE]));
        let client = client_with(transport.clone());

        let first = client.resolve_api_key("jane@example.com", "pw").await.unwrap();
        let second = client
            .resolve_api_key("jane@example.com", "another password")
            .await
            .unwrap();

        assert_eq!(first, "ABC123");
        assert_eq!(second, "ABC123");
        assert_eq!(transport.post_count(), 1);
    }

    #[tokio::test]
    async fn test_cache_is_shared_between_clients() {
        let cache: Arc<dyn ApiKeyCache> = Arc::new(MemoryApiKeyCache::new());
        let first_transport = Arc::new(MockTransport::with_responses([TOKEN_RESPONSE]));
        let second_transport = Arc::new(MockTransport::default());

        let first = PushClient::new(first_transport.clone(), cache.clone(), Endpoints::default());
        let second = PushClient::new(second_transport.clone(), cache, Endpoints::default());

        first.resolve_api_key("jane@example.com", "pw").await.unwrap();
        let api_key = second.resolve_api_key("jane@example.com", "pw").await.unwrap();

        assert_eq!(api_key, "ABC123");
        assert_eq!(second_transport.post_count(), 0);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_posts() {
        let transport = Arc::new(MockTransport::with_responses([TOKEN_RESPONSE, TOKEN_RESPONSE]));
        let client = PushClient::new(
            transport.clone(),
            Arc::new(NoOpApiKeyCache::new()),
            Endpoints::default(),
        );

        client.resolve_api_key("jane@example.com", "pw").await.unwrap();
        client.resolve_api_key("jane@example.com", "pw").await.unwrap();

        assert_eq!(transport.post_count(), 2);
    }

    #[tokio::test]
    async fn test_resolve_api_key_upstream_error() {
        let transport = Arc::new(MockTransport::with_responses(["<ERROR>bad password</ERROR>"]));
        let client = client_with(transport);

        let err = client
            .resolve_api_key("jane@example.com", "wrong")
            .await
            .unwrap_err();

        assert!(matches!(err, PushError::ApiKeyRejected { .. }));
        assert!(err.to_string().contains("bad password"));
        assert!(err.to_string().contains("jane@example.com"));
        assert_eq!(client.cache().len().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_resolve_api_key_without_token_or_error() {
        let transport = Arc::new(MockTransport::with_responses(["<html>maintenance</html>"]));
        let client = client_with(transport);

        let err = client
            .resolve_api_key("jane@example.com", "pw")
            .await
            .unwrap_err();

        assert!(matches!(err, PushError::ApiKeyUnresolved { ref email } if email == "jane@example.com"));
    }

    #[tokio::test]
    async fn test_failed_resolution_is_not_cached() {
        let transport = Arc::new(MockTransport::with_responses([
            "<ERROR>bad password</ERROR>",
            TOKEN_RESPONSE,
        ]));
        let client = client_with(transport.clone());

        assert!(client.resolve_api_key("jane@example.com", "wrong").await.is_err());
        let api_key = client.resolve_api_key("jane@example.com", "right").await.unwrap();

        assert_eq!(api_key, "ABC123");
        assert_eq!(transport.post_count(), 2);
    }

    #[tokio::test]
    async fn test_resolve_api_key_transport_error_not_cached() {
        let transport = Arc::new(MockTransport::with_results([
            Err(transport_error(DEFAULT_USER_SESSION_URL)),
            Ok(TOKEN_RESPONSE.to_string()),
        ]));
        let client = client_with(transport.clone());

        let err = client
            .resolve_api_key("jane@example.com", "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, PushError::Transport { ref url, .. } if url == DEFAULT_USER_SESSION_URL));
        assert_eq!(client.cache().len().await.unwrap(), 0);

        let api_key = client.resolve_api_key("jane@example.com", "secret").await.unwrap();
        assert_eq!(api_key, "ABC123");
        assert_eq!(client.cache().len().await.unwrap(), 1);
        assert_eq!(transport.post_count(), 2);
    }

    #[tokio::test]
    async fn test_send_returns_id() {
        let transport = Arc::new(MockTransport::with_responses([ID_RESPONSE]));
        let client = client_with(transport.clone());
        let notification = Notification::new("Important Notice", "Please wash the dishes!");

        let id = client.send(&notification, "ABC123").await.unwrap();

        assert_eq!(id, 42);
        let posts = transport.posts();
        assert_eq!(posts[0].url, DEFAULT_NOTIFICATIONS_URL);
        assert_eq!(posts[0].params, notification.form_params("ABC123"));
    }

    #[tokio::test]
    async fn test_send_without_id_returns_sentinel() {
        let transport = Arc::new(MockTransport::with_responses(["<notification></notification>"]));
        let client = client_with(transport);

        let id = client
            .send(&Notification::new("t", "m"), "ABC123")
            .await
            .unwrap();

        assert_eq!(id, UNRESOLVED_NOTIFICATION_ID);
    }

    #[tokio::test]
    async fn test_send_includes_optional_fields() {
        let transport = Arc::new(MockTransport::with_responses([ID_RESPONSE]));
        let client = client_with(transport.clone());

        let mut notification = Notification::with_action_label("t", "m", "view");
        notification
            .set_action_url("tel://5551234")
            .set_urgency(Urgency::Emergency)
            .set_sound(Sound::Sound1);

        client.send(&notification, "ABC123").await.unwrap();

        let params = &transport.posts()[0].params;
        assert_eq!(params["notification[run_command]"], "tel://5551234");
        assert_eq!(params["notification[action_loc_key]"], "view");
        assert_eq!(params["notification[message_level]"], "2");
        assert_eq!(params["notification[sound]"], "1.caf");
        assert_eq!(params["notification[silent]"], "0");
        assert_eq!(params["user_credentials"], "ABC123");
    }

    #[tokio::test]
    async fn test_send_with_credentials() {
        let transport = Arc::new(MockTransport::with_responses([TOKEN_RESPONSE, ID_RESPONSE]));
        let client = client_with(transport.clone());

        let id = client
            .send_with_credentials(&Notification::new("t", "m"), "jane@example.com", "pw")
            .await
            .unwrap();

        assert_eq!(id, 42);
        let posts = transport.posts();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[1].params["user_credentials"], "ABC123");
    }

    #[tokio::test]
    async fn test_send_with_credentials_propagates_resolution_error() {
        let transport = Arc::new(MockTransport::with_responses(["<ERROR>unknown user</ERROR>"]));
        let client = client_with(transport.clone());

        let err = client
            .send_with_credentials(&Notification::new("t", "m"), "who@example.com", "pw")
            .await
            .unwrap_err();

        assert!(matches!(err, PushError::ApiKeyRejected { ref message, .. } if message == "unknown user"));
        assert_eq!(transport.post_count(), 1);
    }

    #[tokio::test]
    async fn test_notification_can_be_sent_repeatedly() {
        let transport = Arc::new(MockTransport::with_responses([
            "<id type=\"integer\">1</id>",
            "<id type=\"integer\">2</id>",
        ]));
        let client = client_with(transport);
        let notification = Notification::new("t", "m");

        assert_eq!(client.send(&notification, "k").await.unwrap(), 1);
        assert_eq!(client.send(&notification, "k").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_send_to_many() {
        let transport = Arc::new(MockTransport::with_responses([
            "<id type=\"integer\">7</id>",
            "<nothing/>",
            "<id type=\"integer\">9</id>",
        ]));
        let client = client_with(transport.clone());

        let results = client
            .send_to_many(&Notification::new("t", "m"), &["k1", "k2", "k3"])
            .await;

        let ids: Vec<_> = results.into_iter().map(Result::unwrap).collect();
        assert_eq!(ids, vec![7, UNRESOLVED_NOTIFICATION_ID, 9]);

        let keys: Vec<_> = transport
            .posts()
            .into_iter()
            .map(|post| post.params["user_credentials"].clone())
            .collect();
        assert_eq!(keys, vec!["k1", "k2", "k3"]);
    }

    #[tokio::test]
    async fn test_send_to_many_continues_after_failure() {
        let transport = Arc::new(MockTransport::with_results([
            Ok("<id type=\"integer\">7</id>".to_string()),
            Err(transport_error(DEFAULT_NOTIFICATIONS_URL)),
            Ok("<id type=\"integer\">9</id>".to_string()),
        ]));
        let client = client_with(transport.clone());

        let results = client
            .send_to_many(&Notification::new("t", "m"), &["k1", "k2", "k3"])
            .await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap(), &7);
        assert!(matches!(results[1], Err(PushError::Transport { .. })));
        assert_eq!(results[2].as_ref().unwrap(), &9);
        assert_eq!(transport.post_count(), 3);
    }

    #[test]
    fn test_from_settings() {
        let client = PushClient::from_settings(&Settings::default()).unwrap();
        assert_eq!(client.endpoints(), &Endpoints::default());
    }
}
