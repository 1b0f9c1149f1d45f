// ABOUTME: Cache abstraction layer with pluggable Redis and in-memory backends
// ABOUTME: Exposes the all-or-nothing flush used by cache invalidation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Shared cache store
//!
//! The invalidation surface is all-or-nothing: [`CacheProvider::flush_all`]
//! discards every key in the configured database. `get` and `set` exist for
//! diagnostics and for verifying flushes; no per-key invalidation is routed
//! through the admin API.

/// In-memory backend
pub mod memory;
/// Redis backend
pub mod redis;

pub use memory::InMemoryCache;
pub use self::redis::RedisCache;

use async_trait::async_trait;
use thiserror::Error;

/// Cache backend failure
#[derive(Debug, Error)]
pub enum CacheError {
    /// Could not reach the backend
    #[error("Cache connection failed: {0}")]
    Connection(String),

    /// Backend rejected or failed a command
    #[error("Cache command failed: {0}")]
    Command(String),
}

/// Result alias for cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Key-value cache backend
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Backend name for logs and health output
    fn backend_name(&self) -> &'static str;

    /// Discard every key
    async fn flush_all(&self) -> CacheResult<()>;

    /// Read a key
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Write a key
    async fn set(&self, key: &str, value: &str) -> CacheResult<()>;
}
