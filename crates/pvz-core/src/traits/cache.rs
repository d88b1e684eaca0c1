//! Cache provider trait for pluggable session-cache backends.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for cache backends (Redis or in-memory).
///
/// Values are plain strings. The provider is responsible for key prefixing
/// and TTL enforcement. The `*_many` operations must apply to all keys as
/// one unit (a pipeline on Redis), so callers never observe one key of a
/// group without its siblings.
#[async_trait]
pub trait CacheProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Set a value with a TTL.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()>;

    /// Delete a key from the cache. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> AppResult<()>;

    /// Check whether a key exists in the cache.
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Set the TTL on an existing key. Returns `false` if the key is missing.
    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool>;

    /// Set several values with the same TTL as one unit.
    async fn set_many(&self, entries: &[(&str, &str)], ttl: Duration) -> AppResult<()>;

    /// Delete several keys as one unit.
    async fn delete_many(&self, keys: &[&str]) -> AppResult<()>;

    /// Refresh the TTL of several keys as one unit.
    async fn expire_many(&self, keys: &[&str], ttl: Duration) -> AppResult<()>;

    /// Check that the cache backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
