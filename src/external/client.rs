use std::time::Duration;

use crate::config::settings::ApiConfig;
use crate::error::{PushError, PushResult};

/// Builds the HTTP client used to talk to the Push Notifications API
///
/// # Features
/// - **Timeouts**: request and connect timeouts from `ApiConfig`; these are the
///   only bounds on how long a call can block
/// - **User-Agent**: taken from `ApiConfig::user_agent`
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
///
/// # Example
/// ```rust
/// use appnotify::config::settings::ApiConfig;
/// use appnotify::external::build_http_client;
///
/// let client = build_http_client(&ApiConfig::default()).unwrap();
/// # drop(client);
/// ```
pub fn build_http_client(config: &ApiConfig) -> PushResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        // Compression
        .gzip(true)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|source| PushError::HttpClient { source })
}
