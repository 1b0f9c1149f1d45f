// ABOUTME: Cache invalidation service performing an all-or-nothing flush
// ABOUTME: Short-circuits to Unavailable when no cache is configured, with an optional admin guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Cache invalidation
//!
//! Flushing is an operational action rather than a data read. Whether it
//! sits behind the admin guard is a deployment decision carried by
//! `require_auth`; the default leaves it open to match existing
//! infrastructure-level access control.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument, warn};

use super::bounded;
use crate::cache::CacheProvider;
use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::models::Session;
use crate::permissions::require_admin;

/// Successful flush result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlushOutcome {
    /// Every key was discarded
    Flushed,
}

/// Resets the shared cache store
#[derive(Clone)]
pub struct CacheInvalidationService {
    cache: Option<Arc<dyn CacheProvider>>,
    require_auth: bool,
    timeout: Duration,
}

impl CacheInvalidationService {
    /// Create a service; `cache = None` means no cache is configured
    pub fn new(
        cache: Option<Arc<dyn CacheProvider>>,
        require_auth: bool,
        timeout: Duration,
    ) -> Self {
        Self {
            cache,
            require_auth,
            timeout,
        }
    }

    /// Whether a cache backend is configured
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.cache.is_some()
    }

    /// Whether the admin guard runs before a flush
    #[must_use]
    pub const fn requires_auth(&self) -> bool {
        self.require_auth
    }

    /// Discard every key in the cache
    ///
    /// Idempotent: repeated calls each succeed and leave the store empty.
    ///
    /// # Errors
    ///
    /// - 401 / 403 when the guard is enabled and the caller is not an admin
    /// - 503 when no cache is configured; no store call is attempted
    /// - Upstream failure if the flush errors or times out
    #[instrument(skip_all, fields(operation = "cache_flush"))]
    pub async fn flush(&self, session: Option<&Session>) -> AppResult<FlushOutcome> {
        if self.require_auth {
            require_admin(session)?;
        }

        let Some(cache) = self.cache.as_ref() else {
            warn!("Cache flush requested but no cache is configured");
            return Err(AppError::unavailable(messages::CACHE_NOT_CONFIGURED));
        };

        bounded(
            self.timeout,
            "cache_flush_all",
            messages::CACHE_CLEAR_FAILED,
            cache.flush_all(),
        )
        .await?;

        info!(
            backend = cache.backend_name(),
            user_id = session.map(|s| s.user_id.as_str()),
            "Cache flushed"
        );
        Ok(FlushOutcome::Flushed)
    }
}
