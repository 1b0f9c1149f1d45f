// ABOUTME: Liveness route reporting process health and cache configuration
// ABOUTME: Unauthenticated and side-effect free
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::{constants::routes, resources::ServerResources};

/// Health check body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves requests
    pub status: &'static str,
    /// Whether a cache backend is configured
    pub cache_configured: bool,
    /// Response time, RFC 3339
    pub timestamp: String,
}

/// Health check routes
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::HEALTH, get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "ok",
            cache_configured: resources.cache_service.is_configured(),
            timestamp: Utc::now().to_rfc3339(),
        })
    }
}
