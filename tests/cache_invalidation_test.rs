// ABOUTME: Tests for the cache invalidation service
// ABOUTME: Covers the unconfigured short-circuit, idempotent flushes, and the optional admin guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use catalog_admin_server::cache::{CacheProvider, InMemoryCache};
use catalog_admin_server::errors::ErrorCode;
use catalog_admin_server::models::Session;
use catalog_admin_server::permissions::UserRole;
use catalog_admin_server::services::{CacheInvalidationService, FlushOutcome};
use common::CountingCache;

const TIMEOUT: Duration = Duration::from_millis(200);

fn service_with(cache: &Arc<CountingCache>, require_auth: bool) -> CacheInvalidationService {
    common::init_test_logging();
    let cache: Arc<dyn CacheProvider> = cache.clone();
    CacheInvalidationService::new(Some(cache), require_auth, TIMEOUT)
}

#[tokio::test]
async fn test_unconfigured_cache_is_unavailable() {
    let service = CacheInvalidationService::new(None, false, TIMEOUT);

    assert!(!service.is_configured());
    let err = service.flush(None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    assert_eq!(err.http_status().as_u16(), 503);
    assert_eq!(err.message, "Cache not configured");
}

#[tokio::test]
async fn test_flush_discards_every_key() {
    let cache = Arc::new(CountingCache::new());
    cache.set("search:shoes", "[1,2,3]").await.unwrap();
    cache.set("category:books", "[4]").await.unwrap();

    let outcome = service_with(&cache, false).flush(None).await.unwrap();

    assert_eq!(outcome, FlushOutcome::Flushed);
    assert!(cache.inner.is_empty());
    assert_eq!(cache.get("search:shoes").await.unwrap(), None);
}

#[tokio::test]
async fn test_each_flush_leaves_previous_keys_absent() {
    let cache = Arc::new(CountingCache::new());
    let service = service_with(&cache, false);

    cache.set("search:lamp", "[1]").await.unwrap();
    assert_eq!(service.flush(None).await.unwrap(), FlushOutcome::Flushed);
    assert_eq!(cache.get("search:lamp").await.unwrap(), None);

    cache.set("search:lamp", "[2]").await.unwrap();
    cache.set("category:toys", "[3]").await.unwrap();
    assert_eq!(service.flush(None).await.unwrap(), FlushOutcome::Flushed);
    assert_eq!(cache.get("search:lamp").await.unwrap(), None);
    assert_eq!(cache.get("category:toys").await.unwrap(), None);

    // Flushing an already empty cache still succeeds
    assert_eq!(service.flush(None).await.unwrap(), FlushOutcome::Flushed);
    assert_eq!(cache.flushes(), 3);
}

#[tokio::test]
async fn test_flush_failure_is_upstream() {
    let cache = Arc::new(CountingCache::new());
    cache.fail_flush.store(true, Ordering::SeqCst);

    let err = service_with(&cache, false).flush(None).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::UpstreamFailure);
    assert_eq!(err.message, "Failed to clear cache");
    assert!(err.internal.unwrap().contains("READONLY"));
}

#[tokio::test]
async fn test_guarded_flush_rejects_before_touching_cache() {
    let cache = Arc::new(CountingCache::new());
    let service = service_with(&cache, true);
    assert!(service.requires_auth());

    let err = service.flush(None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);

    let viewer = Session::new("viewer", UserRole::Viewer);
    let err = service.flush(Some(&viewer)).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::PermissionDenied);

    assert_eq!(cache.flushes(), 0);
}

#[tokio::test]
async fn test_guarded_flush_allows_admin() {
    let cache = Arc::new(CountingCache::new());
    cache.set("k", "v").await.unwrap();
    let admin = Session::new("admin", UserRole::Admin);

    service_with(&cache, true).flush(Some(&admin)).await.unwrap();

    assert_eq!(cache.flushes(), 1);
    assert!(cache.inner.is_empty());
}

#[tokio::test]
async fn test_guard_precedes_unconfigured_check() {
    let service = CacheInvalidationService::new(None, true, TIMEOUT);
    let err = service.flush(None).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::AuthRequired);
}

#[tokio::test]
async fn test_in_memory_backend_round_trip() {
    let cache = InMemoryCache::new();
    cache.set("a", "1").await.unwrap();
    cache.set("a", "2").await.unwrap();

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get("a").await.unwrap().as_deref(), Some("2"));
    assert_eq!(cache.backend_name(), "memory");

    cache.flush_all().await.unwrap();
    assert!(cache.is_empty());
}
