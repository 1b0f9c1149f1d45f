// ABOUTME: Cache maintenance route for flushing the shared cache store
// ABOUTME: Keeps the success/message envelope for both success and failure responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;

use crate::{
    constants::{messages, routes},
    errors::{AppError, AppResult, ErrorCode},
    models::CacheClearResponse,
    resources::ServerResources,
};

/// Cache maintenance routes
pub struct CacheRoutes;

impl CacheRoutes {
    /// Create all cache routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::CACHE_CLEAR, post(Self::handle_clear))
            .with_state(resources)
    }

    /// Handle `POST /cache/clear`
    async fn handle_clear(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Response {
        match Self::clear(&resources, &headers).await {
            Ok(()) => (
                StatusCode::OK,
                Json(CacheClearResponse {
                    success: true,
                    message: messages::CACHE_CLEARED.to_owned(),
                }),
            )
                .into_response(),
            Err(e) => Self::failure_response(e),
        }
    }

    async fn clear(resources: &ServerResources, headers: &HeaderMap) -> AppResult<()> {
        // The session is only looked up when the guard is enabled
        let session = if resources.cache_service.requires_auth() {
            resources.session_guard.authenticate(headers).await?
        } else {
            None
        };

        resources.cache_service.flush(session.as_ref()).await?;
        Ok(())
    }

    fn failure_response(error: AppError) -> Response {
        match error.code {
            ErrorCode::ServiceUnavailable | ErrorCode::UpstreamFailure => (
                error.http_status(),
                Json(json!({
                    "success": false,
                    "message": error.message,
                    "error": error.message,
                })),
            )
                .into_response(),
            _ => error.into_response(),
        }
    }
}
