//! Credentials cache.
//!
//! Maps an email address to the API key resolved for it. Entries are written
//! once per email on the first successful resolution and are never evicted or
//! expired. Share one cache between clients through an `Arc` to get a
//! process-wide cache.
//!
//! # Backends
//! - [`MemoryApiKeyCache`]: in-process map behind a mutex (default)
//! - [`NoOpApiKeyCache`]: stores nothing, every resolution hits the API
//!
//! # Configuration
//!
//! ```toml
//! [cache]
//! enabled = true
//! ```

mod error;
mod memory;
mod noop;
mod traits;

use std::sync::Arc;

pub use error::CacheError;
pub use memory::MemoryApiKeyCache;
pub use noop::NoOpApiKeyCache;
pub use traits::ApiKeyCache;

pub use crate::config::settings::CacheSettings;

/// Creates the cache backend selected by `settings`
pub fn cache_from_settings(settings: &CacheSettings) -> Arc<dyn ApiKeyCache> {
    if settings.enabled {
        Arc::new(MemoryApiKeyCache::new())
    } else {
        tracing::debug!("API key cache disabled");
        Arc::new(NoOpApiKeyCache::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cache_from_settings_enabled() {
        let cache = cache_from_settings(&CacheSettings { enabled: true });
        cache.insert("a@example.com", "key").await.unwrap();
        assert_eq!(cache.len().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_cache_from_settings_disabled() {
        let cache = cache_from_settings(&CacheSettings { enabled: false });
        cache.insert("a@example.com", "key").await.unwrap();
        assert_eq!(cache.len().await.unwrap(), 0);
    }
}
