//! ApiKeyCache trait definition.

use async_trait::async_trait;

use crate::cache::CacheError;

/// Trait for credentials cache operations.
///
/// Entries are never removed; a resolved key stays cached for the lifetime of
/// the cache.
#[async_trait]
pub trait ApiKeyCache: Send + Sync {
    /// Get the API key cached for `email`.
    async fn get(&self, email: &str) -> Result<Option<String>, CacheError>;

    /// Store the API key resolved for `email`, replacing any previous value.
    async fn insert(&self, email: &str, api_key: &str) -> Result<(), CacheError>;

    /// Number of cached emails.
    async fn len(&self) -> Result<usize, CacheError>;
}
