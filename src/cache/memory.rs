//! Memory cache implementation using cached::UnboundCache.

use std::sync::Mutex;

use async_trait::async_trait;
use cached::{Cached, UnboundCache};

use crate::cache::{ApiKeyCache, CacheError};

/// In-memory credentials cache without size limit or TTL.
pub struct MemoryApiKeyCache {
    store: Mutex<UnboundCache<String, String>>,
}

impl MemoryApiKeyCache {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(UnboundCache::new()),
        }
    }
}

impl Default for MemoryApiKeyCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ApiKeyCache for MemoryApiKeyCache {
    async fn get(&self, email: &str) -> Result<Option<String>, CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        Ok(store.cache_get(email).cloned())
    }

    async fn insert(&self, email: &str, api_key: &str) -> Result<(), CacheError> {
        let mut store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        store.cache_set(email.to_string(), api_key.to_string());
        Ok(())
    }

    async fn len(&self) -> Result<usize, CacheError> {
        let store = self
            .store
            .lock()
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        Ok(store.cache_size())
    }
}
