// ABOUTME: Route module organization for the admin control plane HTTP endpoints
// ABOUTME: Provides route definitions grouped by domain and the assembled application router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Route module
//!
//! Each domain module exposes a `*Routes` type with a `routes` constructor
//! returning a stateful [`Router`]. [`build_router`] merges them and adds
//! request tracing.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::resources::ServerResources;

// ═══════════════════════════════════════════════════════════════
// CORE INFRASTRUCTURE
// ═══════════════════════════════════════════════════════════════

/// Health check route
pub mod health;

// ═══════════════════════════════════════════════════════════════
// ADMIN SURFACE
// ═══════════════════════════════════════════════════════════════

/// Admin statistics and category routes
pub mod admin;

/// Cache maintenance routes
pub mod cache;

/// Redirect-only login entry point
pub mod login_redirect;

// ═══════════════════════════════════════════════════════════════
// RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

pub use admin::AdminRoutes;
pub use cache::CacheRoutes;
pub use health::HealthRoutes;
pub use login_redirect::{login_redirect_target, LoginRedirectRoutes};

/// Assemble every route with request tracing
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AdminRoutes::routes(Arc::clone(&resources)))
        .merge(CacheRoutes::routes(Arc::clone(&resources)))
        .merge(LoginRedirectRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
}
