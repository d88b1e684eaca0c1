//! Redis cache provider implementation.
//!
//! Grouped operations are sent as `MULTI`/`EXEC` pipelines. Every command
//! is bounded by the configured response timeout.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;

use pvz_core::error::{AppError, ErrorKind};
use pvz_core::result::AppResult;
use pvz_core::traits::cache::CacheProvider;

use super::client::RedisClient;

/// Redis-backed cache provider.
#[derive(Debug, Clone)]
pub struct RedisCacheProvider {
    client: RedisClient,
    response_timeout: Duration,
}

impl RedisCacheProvider {
    /// Create a new Redis cache provider.
    pub fn new(client: RedisClient, response_timeout: Duration) -> Self {
        Self {
            client,
            response_timeout,
        }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Cache, format!("Redis error: {e}"), e)
    }

    /// Await a Redis call under the response timeout.
    async fn bounded<T>(
        &self,
        op: &str,
        fut: impl Future<Output = redis::RedisResult<T>> + Send,
    ) -> AppResult<T> {
        match tokio::time::timeout(self.response_timeout, fut).await {
            Ok(result) => result.map_err(Self::map_err),
            Err(_) => Err(AppError::cache(format!("Redis {op} timed out"))),
        }
    }

    fn prefixed_all(&self, keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| self.client.prefixed_key(k)).collect()
    }
}

#[async_trait]
impl CacheProvider for RedisCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded("GET", async move { conn.get(&full_key).await })
            .await
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded("SET", async move {
            conn.set_ex::<_, _, ()>(&full_key, value, ttl.as_secs()).await
        })
        .await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded("DEL", async move { conn.del::<_, ()>(&full_key).await })
            .await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        self.bounded("EXISTS", async move { conn.exists(&full_key).await })
            .await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let full_key = self.client.prefixed_key(key);
        let mut conn = self.client.conn_mut();
        let secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        self.bounded("EXPIRE", async move { conn.expire(&full_key, secs).await })
            .await
    }

    async fn set_many(&self, entries: &[(&str, &str)], ttl: Duration) -> AppResult<()> {
        let mut pipe = redis::pipe();
        pipe.atomic();
        for (key, value) in entries {
            pipe.set_ex(self.client.prefixed_key(key), *value, ttl.as_secs())
                .ignore();
        }
        let mut conn = self.client.conn_mut();
        self.bounded("MULTI SET", async move {
            let result: redis::RedisResult<()> = pipe.query_async(&mut conn).await;
            result
        })
        .await
    }

    async fn delete_many(&self, keys: &[&str]) -> AppResult<()> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut pipe = redis::pipe();
        pipe.atomic().del(self.prefixed_all(keys)).ignore();
        let mut conn = self.client.conn_mut();
        self.bounded("MULTI DEL", async move {
            let result: redis::RedisResult<()> = pipe.query_async(&mut conn).await;
            result
        })
        .await
    }

    async fn expire_many(&self, keys: &[&str], ttl: Duration) -> AppResult<()> {
        let secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let mut pipe = redis::pipe();
        pipe.atomic();
        for key in self.prefixed_all(keys) {
            pipe.expire(key, secs).ignore();
        }
        let mut conn = self.client.conn_mut();
        self.bounded("MULTI EXPIRE", async move {
            let result: redis::RedisResult<()> = pipe.query_async(&mut conn).await;
            result
        })
        .await
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = self
            .bounded("PING", async move {
                redis::cmd("PING").query_async(&mut conn).await
            })
            .await?;
        Ok(pong == "PONG")
    }
}
