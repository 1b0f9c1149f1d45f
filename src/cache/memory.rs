// ABOUTME: In-process cache backend built on DashMap
// ABOUTME: Used for local development and as a deterministic stand-in for Redis
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use super::{CacheProvider, CacheResult};

/// Concurrent in-memory key-value cache
#[derive(Debug, Default)]
pub struct InMemoryCache {
    entries: DashMap<String, String>,
}

impl InMemoryCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CacheProvider for InMemoryCache {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn flush_all(&self) -> CacheResult<()> {
        let discarded = self.entries.len();
        self.entries.clear();
        debug!(discarded, "In-memory cache flushed");
        Ok(())
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}
