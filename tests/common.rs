// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides counting store/cache doubles, token minting, and router helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `catalog_admin_server`

use std::{
    env,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex, Once,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use catalog_admin_server::{
    auth::SessionClaims,
    cache::{CacheError, CacheProvider, CacheResult, InMemoryCache},
    config::{LogFormat, ServerConfig},
    database::{CatalogStore, DatabaseError, DatabaseResult},
    models::{CategoryRow, SearchSettings},
    permissions::UserRole,
    resources::ServerResources,
    routes::build_router,
};
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test_session_secret_for_admin_routes";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Configuration used by route and service tests
pub fn test_config(require_auth_for_cache_clear: bool) -> ServerConfig {
    ServerConfig {
        http_port: 0,
        database_url: "sqlite::memory:".to_owned(),
        redis_url: None,
        session_jwt_secret: TEST_SECRET.to_owned(),
        upstream_timeout: Duration::from_millis(200),
        require_auth_for_cache_clear,
        login_path: "/login".to_owned(),
        log_format: LogFormat::Pretty,
    }
}

/// Mint a session token for `user_id` that expires `ttl_secs` from now
pub fn issue_token(user_id: &str, role: &str, ttl_secs: i64) -> String {
    let exp = Utc::now().timestamp() + ttl_secs;
    let claims = serde_json::json!({
        "sub": user_id,
        "role": role,
        "exp": exp,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encoding")
}

/// Mint a token through the typed claims
pub fn issue_typed_token(user_id: &str, role: UserRole, ttl_secs: u64) -> String {
    let claims = SessionClaims {
        sub: user_id.to_owned(),
        role,
        exp: Utc::now().timestamp() as u64 + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("token encoding")
}

pub fn admin_token() -> String {
    issue_token("admin-user", "admin", 3600)
}

pub fn viewer_token() -> String {
    issue_token("viewer-user", "viewer", 3600)
}

pub fn editor_token() -> String {
    issue_token("editor-user", "editor", 3600)
}

// ============================================================================
// Catalog store double
// ============================================================================

/// Catalog store with fixed data that counts every call
#[derive(Default)]
pub struct CountingCatalogStore {
    pub products: u64,
    pub searches: u64,
    pub subscribers: u64,
    pub categories: Vec<CategoryRow>,
    pub fail_subscribers: AtomicBool,
    pub fail_categories: AtomicBool,
    pub delay: Option<Duration>,
    pub fail_writes: AtomicBool,
    pub fail_settings: AtomicBool,
    /// Updates and deletes report that no row matched
    pub missing_product: AtomicBool,
    pub settings: Mutex<Option<SearchSettings>>,
    pub last_update: Mutex<Option<(i64, String)>>,
    pub last_delete: Mutex<Option<i64>>,
    pub last_saved_by: Mutex<Option<String>>,
    calls: AtomicUsize,
    writes: AtomicUsize,
}

impl CountingCatalogStore {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_counts(products: u64, searches: u64, subscribers: u64) -> Self {
        Self {
            products,
            searches,
            subscribers,
            ..Self::default()
        }
    }

    pub fn with_categories(categories: Vec<Option<&str>>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|c| CategoryRow {
                    category: c.map(str::to_owned),
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of write methods invoked, successful or not
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn with_settings(settings: SearchSettings) -> Self {
        Self {
            settings: Mutex::new(Some(settings)),
            ..Self::default()
        }
    }

    async fn record_write(&self) -> DatabaseResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.record().await;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError {
                context: "database is locked".to_owned(),
            });
        }
        Ok(())
    }

    async fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl CatalogStore for CountingCatalogStore {
    async fn count_products(&self) -> DatabaseResult<u64> {
        self.record().await;
        Ok(self.products)
    }

    async fn count_searches(&self) -> DatabaseResult<u64> {
        self.record().await;
        Ok(self.searches)
    }

    async fn count_active_subscribers(&self) -> DatabaseResult<u64> {
        self.record().await;
        if self.fail_subscribers.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError {
                context: "relation email_subscribers is locked".to_owned(),
            });
        }
        Ok(self.subscribers)
    }

    async fn list_product_categories(&self) -> DatabaseResult<Vec<CategoryRow>> {
        self.record().await;
        if self.fail_categories.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError {
                context: "connection reset by peer".to_owned(),
            });
        }
        Ok(self.categories.clone())
    }

    async fn update_product_category(&self, id: i64, category: &str) -> DatabaseResult<bool> {
        self.record_write().await?;
        if self.missing_product.load(Ordering::SeqCst) {
            return Ok(false);
        }
        *self.last_update.lock().unwrap() = Some((id, category.to_owned()));
        Ok(true)
    }

    async fn delete_product(&self, id: i64) -> DatabaseResult<bool> {
        self.record_write().await?;
        if self.missing_product.load(Ordering::SeqCst) {
            return Ok(false);
        }
        *self.last_delete.lock().unwrap() = Some(id);
        Ok(true)
    }

    async fn load_search_settings(&self) -> DatabaseResult<Option<SearchSettings>> {
        self.record().await;
        if self.fail_settings.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError {
                context: "no such table: search_settings".to_owned(),
            });
        }
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn save_search_settings(
        &self,
        settings: &SearchSettings,
        updated_by: &str,
    ) -> DatabaseResult<()> {
        self.record_write().await?;
        *self.settings.lock().unwrap() = Some(settings.clone());
        *self.last_saved_by.lock().unwrap() = Some(updated_by.to_owned());
        Ok(())
    }
}

// ============================================================================
// Cache double
// ============================================================================

/// In-memory cache that counts flushes and can be told to fail
#[derive(Default)]
pub struct CountingCache {
    pub inner: InMemoryCache,
    pub fail_flush: AtomicBool,
    flushes: AtomicUsize,
}

impl CountingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flushes(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheProvider for CountingCache {
    fn backend_name(&self) -> &'static str {
        "counting"
    }

    async fn flush_all(&self) -> CacheResult<()> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        if self.fail_flush.load(Ordering::SeqCst) {
            return Err(CacheError::Command("READONLY replica".to_owned()));
        }
        self.inner.flush_all().await
    }

    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.inner.set(key, value).await
    }
}

// ============================================================================
// Router helpers
// ============================================================================

pub fn build_resources(
    store: Arc<CountingCatalogStore>,
    cache: Option<Arc<CountingCache>>,
    require_auth_for_cache_clear: bool,
) -> ServerResources {
    init_test_logging();
    let config = test_config(require_auth_for_cache_clear);
    let cache = cache.map(|c| c as Arc<dyn CacheProvider>);
    ServerResources::from_config(&config, store, cache)
}

pub fn build_app(
    store: Arc<CountingCatalogStore>,
    cache: Option<Arc<CountingCache>>,
    require_auth_for_cache_clear: bool,
) -> Router {
    build_router(Arc::new(build_resources(
        store,
        cache,
        require_auth_for_cache_clear,
    )))
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Request with a JSON body and an optional bearer token
pub fn send_json(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

/// Send a request and decode the JSON body (`Value::Null` when empty)
pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
