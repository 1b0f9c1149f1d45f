// ABOUTME: Admin aggregation service for catalog statistics and category listings
// ABOUTME: Enforces the admin guard before any store query and fails whole on any count error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use super::bounded;
use crate::constants::messages;
use crate::database::CatalogStore;
use crate::errors::AppResult;
use crate::models::{AggregateStats, CategoryListing, Session};
use crate::permissions::require_admin;

/// Read-only admin operations over the catalog store
#[derive(Clone)]
pub struct AdminAggregationService {
    store: Arc<dyn CatalogStore>,
    timeout: Duration,
}

impl AdminAggregationService {
    /// Create a service reading from `store`, bounding each query by `timeout`
    pub fn new(store: Arc<dyn CatalogStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Compute product, search, and active subscriber counts
    ///
    /// The three counts run concurrently and independently; no partial
    /// result is returned if any one fails.
    ///
    /// # Errors
    ///
    /// - 401 / 403 from the admin guard, before any query runs
    /// - Upstream failure if any count errors or times out
    #[instrument(skip_all, fields(operation = "compute_stats"))]
    pub async fn compute_stats(&self, session: Option<&Session>) -> AppResult<AggregateStats> {
        let admin = require_admin(session)?;

        let (total_products, total_searches, total_subscribers) = tokio::try_join!(
            bounded(
                self.timeout,
                "count_products",
                messages::STATS_FAILED,
                self.store.count_products(),
            ),
            bounded(
                self.timeout,
                "count_searches",
                messages::STATS_FAILED,
                self.store.count_searches(),
            ),
            bounded(
                self.timeout,
                "count_active_subscribers",
                messages::STATS_FAILED,
                self.store.count_active_subscribers(),
            ),
        )?;

        let stats = AggregateStats {
            total_products,
            total_searches,
            total_subscribers,
        };

        info!(
            user_id = %admin.user_id,
            total_products,
            total_searches,
            total_subscribers,
            "Admin stats computed"
        );
        Ok(stats)
    }

    /// List distinct non-empty product categories in ascending order
    ///
    /// # Errors
    ///
    /// - 401 / 403 from the admin guard, before any query runs
    /// - Upstream failure if the category query errors or times out
    #[instrument(skip_all, fields(operation = "list_categories"))]
    pub async fn list_categories(&self, session: Option<&Session>) -> AppResult<CategoryListing> {
        let admin = require_admin(session)?;

        let rows = bounded(
            self.timeout,
            "list_product_categories",
            messages::CATEGORIES_FAILED,
            self.store.list_product_categories(),
        )
        .await?;

        let listing = CategoryListing::from_rows(rows);
        info!(
            user_id = %admin.user_id,
            count = listing.len(),
            "Admin categories listed"
        );
        Ok(listing)
    }
}
