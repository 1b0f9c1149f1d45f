// ABOUTME: Redirect-only admin login entry point
// ABOUTME: Forwards to the canonical login page with the query string preserved verbatim
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use std::sync::Arc;

use axum::{
    extract::{RawQuery, State},
    response::Redirect,
    routing::get,
    Router,
};
use tracing::debug;

use crate::{constants::routes, resources::ServerResources};

/// Build the redirect target for `login_path`
///
/// The raw query string is appended unchanged; an absent or empty query
/// produces the bare path.
#[must_use]
pub fn login_redirect_target(login_path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{login_path}?{query}"),
        _ => login_path.to_owned(),
    }
}

/// Legacy login entry point routes
pub struct LoginRedirectRoutes;

impl LoginRedirectRoutes {
    /// Create the redirect route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(routes::ADMIN_LOGIN, get(Self::handle_redirect))
            .with_state(resources)
    }

    /// Handle `GET /admin/login`
    async fn handle_redirect(
        State(resources): State<Arc<ServerResources>>,
        RawQuery(query): RawQuery,
    ) -> Redirect {
        let target = login_redirect_target(&resources.login_path, query.as_deref());
        debug!(target = %target, "Redirecting admin login");
        Redirect::temporary(&target)
    }
}
