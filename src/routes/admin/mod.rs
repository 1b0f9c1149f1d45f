// ABOUTME: Admin API route handlers for statistics, categories, products, and search settings
// ABOUTME: Resolves the session per request and delegates the role gate to the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Admin routes
//!
//! Handlers are thin wrappers: authenticate, hand the resolved session to
//! the service, serialize the result. The role gate lives in the service so
//! it runs unconditionally regardless of which transport calls it.
//! Request bodies reach the service as raw bytes and are decoded only after
//! the caller has been authorized.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, patch},
    Json, Router,
};

use crate::{
    constants::routes, errors::AppResult, models::SuccessResponse, resources::ServerResources,
};

/// Admin routes
pub struct AdminRoutes;

impl AdminRoutes {
    /// Create all admin routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::ADMIN_CATEGORIES, get(Self::handle_list_categories))
            .route(routes::ADMIN_STATS, get(Self::handle_stats))
            .route(
                routes::ADMIN_PRODUCT,
                patch(Self::handle_update_product).delete(Self::handle_delete_product),
            )
            .route(
                routes::ADMIN_SETTINGS,
                get(Self::handle_get_settings).put(Self::handle_update_settings),
            )
            .with_state(resources)
    }

    /// Handle `GET /admin/categories`
    async fn handle_list_categories(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<impl IntoResponse> {
        let session = resources.session_guard.authenticate(&headers).await?;
        let listing = resources
            .admin_service
            .list_categories(session.as_ref())
            .await?;

        Ok((StatusCode::OK, Json(listing)))
    }

    /// Handle `GET /admin/stats`
    async fn handle_stats(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<impl IntoResponse> {
        let session = resources.session_guard.authenticate(&headers).await?;
        let stats = resources
            .admin_service
            .compute_stats(session.as_ref())
            .await?;

        Ok((StatusCode::OK, Json(stats)))
    }

    /// Handle `PATCH /admin/products/:id`
    async fn handle_update_product(
        State(resources): State<Arc<ServerResources>>,
        Path(product_id): Path<String>,
        headers: HeaderMap,
        body: Bytes,
    ) -> AppResult<impl IntoResponse> {
        let session = resources.session_guard.authenticate(&headers).await?;
        resources
            .product_service
            .update_category(session.as_ref(), &product_id, &body)
            .await?;

        Ok((StatusCode::OK, Json(SuccessResponse::ok())))
    }

    /// Handle `DELETE /admin/products/:id`
    async fn handle_delete_product(
        State(resources): State<Arc<ServerResources>>,
        Path(product_id): Path<String>,
        headers: HeaderMap,
    ) -> AppResult<impl IntoResponse> {
        let session = resources.session_guard.authenticate(&headers).await?;
        resources
            .product_service
            .delete(session.as_ref(), &product_id)
            .await?;

        Ok((StatusCode::OK, Json(SuccessResponse::ok())))
    }

    /// Handle `GET /admin/settings`
    async fn handle_get_settings(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> AppResult<impl IntoResponse> {
        let session = resources.session_guard.authenticate(&headers).await?;
        let settings = resources.settings_service.get(session.as_ref()).await?;

        Ok((StatusCode::OK, Json(settings)))
    }

    /// Handle `PUT /admin/settings`
    async fn handle_update_settings(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> AppResult<impl IntoResponse> {
        let session = resources.session_guard.authenticate(&headers).await?;
        resources
            .settings_service
            .update(session.as_ref(), &body)
            .await?;

        Ok((StatusCode::OK, Json(SuccessResponse::ok())))
    }
}
