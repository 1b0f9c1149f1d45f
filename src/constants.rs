// ABOUTME: Application constants for routes, credentials, table names, and defaults
// ABOUTME: Centralizes literal values shared between handlers, services, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

/// HTTP route paths
pub mod routes {
    /// Distinct product categories (admin)
    pub const ADMIN_CATEGORIES: &str = "/admin/categories";
    /// Aggregate catalog statistics (admin)
    pub const ADMIN_STATS: &str = "/admin/stats";
    /// Legacy admin login entry point, redirect only
    pub const ADMIN_LOGIN: &str = "/admin/login";
    /// Single product category edit and removal (admin)
    pub const ADMIN_PRODUCT: &str = "/admin/products/:id";
    /// Search tuning settings (read: any session, write: admin or editor)
    pub const ADMIN_SETTINGS: &str = "/admin/settings";
    /// Shared cache flush
    pub const CACHE_CLEAR: &str = "/cache/clear";
    /// Liveness check
    pub const HEALTH: &str = "/health";
    /// Default canonical login page
    pub const DEFAULT_LOGIN_PATH: &str = "/login";
}

/// Credential locations on inbound requests
pub mod credentials {
    /// Cookie carrying the session token
    pub const SESSION_COOKIE: &str = "session_token";
    /// Authorization scheme prefix
    pub const BEARER_PREFIX: &str = "Bearer ";
}

/// Data store tables queried by the aggregation service
pub mod tables {
    /// Product catalog
    pub const PRODUCTS: &str = "products";
    /// Search event log
    pub const SEARCH_ANALYTICS: &str = "search_analytics";
    /// Newsletter subscribers
    pub const EMAIL_SUBSCRIBERS: &str = "email_subscribers";
    /// Single-row search tuning settings
    pub const SEARCH_SETTINGS: &str = "search_settings";
}

/// Caller-facing messages
pub mod messages {
    /// Stats query failure
    pub const STATS_FAILED: &str = "Failed to fetch stats";
    /// Category query failure
    pub const CATEGORIES_FAILED: &str = "Failed to fetch categories";
    /// Cache flush failure
    pub const CACHE_CLEAR_FAILED: &str = "Failed to clear cache";
    /// Cache flush success
    pub const CACHE_CLEARED: &str = "Cache cleared";
    /// No cache backend configured
    pub const CACHE_NOT_CONFIGURED: &str = "Cache not configured";
    /// Category reassignment failure
    pub const PRODUCT_UPDATE_FAILED: &str = "Failed to update category";
    /// Product removal failure
    pub const PRODUCT_DELETE_FAILED: &str = "Failed to delete product";
    /// Category missing from an update body
    pub const CATEGORY_REQUIRED: &str = "category is required";
    /// Product id that is not a positive integer
    pub const INVALID_PRODUCT_ID: &str = "Invalid product id";
    /// No product with the requested id
    pub const PRODUCT_NOT_FOUND: &str = "Product not found";
    /// Settings read failure
    pub const SETTINGS_FETCH_FAILED: &str = "Failed to fetch settings";
    /// Settings write failure
    pub const SETTINGS_SAVE_FAILED: &str = "Failed to save settings";
    /// Settings body that does not decode
    pub const INVALID_SETTINGS: &str = "Invalid settings payload";
    /// Session lookup failure
    pub const SESSION_FAILED: &str = "Failed to resolve session";
}

/// Configuration defaults
pub mod defaults {
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8081;
    /// Catalog database location
    pub const DATABASE_URL: &str = "sqlite:./data/catalog.db";
    /// Bound on every external call, in seconds
    pub const UPSTREAM_TIMEOUT_SECS: u64 = 5;
    /// Log filter when `RUST_LOG` is unset
    pub const LOG_FILTER: &str = "info";
}

/// Environment variable names
pub mod env_vars {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Catalog database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Optional Redis URL
    pub const REDIS_URL: &str = "REDIS_URL";
    /// HS256 secret shared with the session issuer
    pub const SESSION_JWT_SECRET: &str = "SESSION_JWT_SECRET";
    /// External call timeout
    pub const UPSTREAM_TIMEOUT_SECS: &str = "UPSTREAM_TIMEOUT_SECS";
    /// Whether `/cache/clear` runs the admin guard
    pub const REQUIRE_AUTH_FOR_CACHE_CLEAR: &str = "REQUIRE_AUTH_FOR_CACHE_CLEAR";
    /// Canonical login path for the redirect entry point
    pub const LOGIN_PATH: &str = "LOGIN_PATH";
    /// Log output format (`pretty` or `json`)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}
