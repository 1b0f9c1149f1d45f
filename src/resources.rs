// ABOUTME: Shared server resources handed to every route module
// ABOUTME: Wires the session guard, admin services, and redirect target from configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use std::sync::Arc;

use crate::auth::{JwtSessionResolver, SessionGuard, SessionResolver};
use crate::cache::CacheProvider;
use crate::config::ServerConfig;
use crate::database::CatalogStore;
use crate::services::{
    AdminAggregationService, CacheInvalidationService, ProductAdminService, SearchSettingsService,
};

/// Request-independent handles shared by all handlers
///
/// Holds no mutable state; everything behind the `Arc`s manages its own
/// concurrency.
#[derive(Clone)]
pub struct ServerResources {
    /// Authentication front door
    pub session_guard: SessionGuard,
    /// Catalog statistics and categories
    pub admin_service: AdminAggregationService,
    /// Product category edits and removal
    pub product_service: ProductAdminService,
    /// Search tuning settings
    pub settings_service: SearchSettingsService,
    /// Shared cache flush
    pub cache_service: CacheInvalidationService,
    /// Canonical login path for the redirect entry point
    pub login_path: String,
}

impl ServerResources {
    /// Assemble resources from explicit collaborators
    pub fn new(
        config: &ServerConfig,
        resolver: Arc<dyn SessionResolver>,
        store: Arc<dyn CatalogStore>,
        cache: Option<Arc<dyn CacheProvider>>,
    ) -> Self {
        let timeout = config.upstream_timeout;
        Self {
            session_guard: SessionGuard::new(resolver, timeout),
            admin_service: AdminAggregationService::new(Arc::clone(&store), timeout),
            product_service: ProductAdminService::new(Arc::clone(&store), timeout),
            settings_service: SearchSettingsService::new(store, timeout),
            cache_service: CacheInvalidationService::new(
                cache,
                config.require_auth_for_cache_clear,
                timeout,
            ),
            login_path: config.login_path.clone(),
        }
    }

    /// Assemble resources using the HS256 resolver keyed by the configured secret
    pub fn from_config(
        config: &ServerConfig,
        store: Arc<dyn CatalogStore>,
        cache: Option<Arc<dyn CacheProvider>>,
    ) -> Self {
        let resolver = Arc::new(JwtSessionResolver::new(
            config.session_jwt_secret.as_bytes(),
        ));
        Self::new(config, resolver, store, cache)
    }
}
