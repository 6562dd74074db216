use crate::cache::CacheError;
use thiserror::Error;

/// Error raised by every failing call against the Push Notifications API.
///
/// All variants describe the same failure kind (the API or its transport did
/// not give us what we asked for); they are split only so callers can match on
/// the cause. A missing notification id in a send response is *not* an error,
/// see [`crate::services::UNRESOLVED_NOTIFICATION_ID`].
#[derive(Error, Debug)]
pub enum PushError {
    /// Connecting, posting or reading the response failed
    #[error("Could not read from URL {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed
    #[error("Could not create HTTP client")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },

    /// The session endpoint answered with an explicit `<ERROR>` message
    #[error("Error resolving API key for user {email} ({message}).")]
    ApiKeyRejected { email: String, message: String },

    /// The session endpoint answered without a token and without an error message
    #[error("Error resolving API key for user {email}.")]
    ApiKeyUnresolved { email: String },

    /// The credentials cache could not be read or written
    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl PushError {
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }
}

/// Type alias for Result with PushError
pub type PushResult<T> = Result<T, PushError>;
