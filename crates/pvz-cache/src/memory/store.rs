//! In-memory cache implementation using moka with per-entry expiry.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tokio::sync::Mutex;

use pvz_core::config::MemoryCacheConfig;
use pvz_core::result::AppResult;
use pvz_core::traits::cache::CacheProvider;

/// A cached value together with the TTL it was written with.
#[derive(Debug, Clone)]
struct Entry {
    value: Arc<str>,
    ttl: Duration,
}

/// Expires every entry after its own TTL, restarting on each write.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, entry: &Entry, _now: Instant) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _now: Instant,
        _remaining: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// In-memory cache provider using moka.
///
/// Grouped writes are serialized by `write_gate` so concurrent `*_many`
/// calls never interleave.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    cache: Cache<String, Entry>,
    write_gate: Arc<Mutex<()>>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        Self {
            cache,
            write_gate: Arc::new(Mutex::new(())),
        }
    }

    async fn insert(&self, key: &str, value: &str, ttl: Duration) {
        self.cache
            .insert(
                key.to_string(),
                Entry {
                    value: Arc::from(value),
                    ttl,
                },
            )
            .await;
    }

    async fn touch(&self, key: &str, ttl: Duration) -> bool {
        match self.cache.get(key).await {
            Some(entry) => {
                self.cache
                    .insert(key.to_string(), Entry { ttl, ..entry })
                    .await;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|e| e.value.to_string()))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.insert(key, value, ttl).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.cache.get(key).await.is_some())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        Ok(self.touch(key, ttl).await)
    }

    async fn set_many(&self, entries: &[(&str, &str)], ttl: Duration) -> AppResult<()> {
        let _guard = self.write_gate.lock().await;
        for (key, value) in entries {
            self.insert(key, value, ttl).await;
        }
        Ok(())
    }

    async fn delete_many(&self, keys: &[&str]) -> AppResult<()> {
        let _guard = self.write_gate.lock().await;
        for key in keys {
            self.cache.invalidate(*key).await;
        }
        Ok(())
    }

    async fn expire_many(&self, keys: &[&str], ttl: Duration) -> AppResult<()> {
        let _guard = self.write_gate.lock().await;
        for key in keys {
            self.touch(key, ttl).await;
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
