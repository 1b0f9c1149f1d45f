// ABOUTME: Admin product maintenance: category reassignment and removal
// ABOUTME: Runs the admin guard before the id or body is even looked at
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, instrument};

use super::bounded;
use crate::constants::messages;
use crate::database::CatalogStore;
use crate::errors::{AppError, AppResult};
use crate::models::{CategoryUpdate, Session};
use crate::permissions::require_admin;

/// Single-product writes behind the admin guard
#[derive(Clone)]
pub struct ProductAdminService {
    store: Arc<dyn CatalogStore>,
    timeout: Duration,
}

impl ProductAdminService {
    /// Create a service writing to `store`
    pub fn new(store: Arc<dyn CatalogStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Reassign the category of one product
    ///
    /// `body` is decoded only after the guard passes.
    ///
    /// # Errors
    ///
    /// - 401 / 403 from the admin guard, before any decoding or write
    /// - 400 for a malformed id or a missing, empty, or non-string category
    /// - 404 when no product has the id
    /// - Upstream failure if the update errors or times out
    #[instrument(skip_all, fields(operation = "update_product_category"))]
    pub async fn update_category(
        &self,
        session: Option<&Session>,
        product_id: &str,
        body: &[u8],
    ) -> AppResult<()> {
        let admin = require_admin(session)?;
        let id = parse_product_id(product_id)?;
        let category = CategoryUpdate::from_body(body)
            .category
            .ok_or_else(|| AppError::invalid_input(messages::CATEGORY_REQUIRED))?;

        let updated = bounded(
            self.timeout,
            "update_product_category",
            messages::PRODUCT_UPDATE_FAILED,
            self.store.update_product_category(id, &category),
        )
        .await?;
        if !updated {
            return Err(AppError::not_found(messages::PRODUCT_NOT_FOUND));
        }

        info!(
            user_id = %admin.user_id,
            product_id = id,
            category = %category,
            "Product category updated"
        );
        Ok(())
    }

    /// Remove one product from the catalog
    ///
    /// # Errors
    ///
    /// - 401 / 403 from the admin guard, before any write
    /// - 400 for a malformed id
    /// - 404 when no product has the id
    /// - Upstream failure if the delete errors or times out
    #[instrument(skip_all, fields(operation = "delete_product"))]
    pub async fn delete(&self, session: Option<&Session>, product_id: &str) -> AppResult<()> {
        let admin = require_admin(session)?;
        let id = parse_product_id(product_id)?;

        let deleted = bounded(
            self.timeout,
            "delete_product",
            messages::PRODUCT_DELETE_FAILED,
            self.store.delete_product(id),
        )
        .await?;
        if !deleted {
            return Err(AppError::not_found(messages::PRODUCT_NOT_FOUND));
        }

        info!(user_id = %admin.user_id, product_id = id, "Product deleted");
        Ok(())
    }
}

fn parse_product_id(raw: &str) -> AppResult<i64> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::invalid_input(messages::INVALID_PRODUCT_ID))
}
