// ABOUTME: Redis cache backend over a multiplexed ConnectionManager
// ABOUTME: Flush maps to FLUSHDB on the database selected by the connection URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use tracing::info;

use super::{CacheError, CacheProvider, CacheResult};

/// Redis-backed cache
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    /// Connect to `redis_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the server is unreachable
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        let client =
            Client::open(redis_url).map_err(|e| CacheError::Connection(e.to_string()))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(e.to_string()))?;

        info!("Redis cache connected");
        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheProvider for RedisCache {
    fn backend_name(&self) -> &'static str {
        "redis"
    }

    async fn flush_all(&self) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        redis::cmd("FLUSHDB")
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::Command(e.to_string()))
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.manager.clone();
        conn.get::<_, Option<String>>(key)
            .await
            .map_err(|e| CacheError::Command(e.to_string()))
    }

    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        conn.set::<_, _, ()>(key, value)
            .await
            .map_err(|e| CacheError::Command(e.to_string()))
    }
}
