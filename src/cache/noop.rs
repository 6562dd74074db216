//! NoOp cache implementation.
//!
//! Used when caching is disabled. All operations are no-ops.

use async_trait::async_trait;

use crate::cache::{ApiKeyCache, CacheError};

/// A no-operation cache that doesn't store anything.
///
/// Used when `cache.enabled = false` in configuration.
pub struct NoOpApiKeyCache;

impl NoOpApiKeyCache {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpApiKeyCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyCache for NoOpApiKeyCache {
    async fn get(&self, _email: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn insert(&self, _email: &str, _api_key: &str) -> Result<(), CacheError> {
        Ok(())
    }

    async fn len(&self) -> Result<usize, CacheError> {
        Ok(0)
    }
}
