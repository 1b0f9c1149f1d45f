// ABOUTME: Catalog store abstraction consumed by the admin services
// ABOUTME: Counts, category projection, product edits, and the settings row behind an async trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Catalog data store
//!
//! [`CatalogStore`] exposes exactly the queries the admin surface needs.
//! Each call is independent, so counts taken in one request are not
//! guaranteed to be mutually consistent. Writes address a single product
//! or the single settings row.

/// Store error types
pub mod errors;
/// `SQLite` implementation
pub mod sqlite;

pub use errors::{DatabaseError, DatabaseResult};
pub use sqlite::SqliteCatalogStore;

use async_trait::async_trait;

use crate::models::{CategoryRow, SearchSettings};

/// Interface over the catalog, search log, subscriber list, and settings
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Count all catalog products
    async fn count_products(&self) -> DatabaseResult<u64>;

    /// Count all recorded search events
    async fn count_searches(&self) -> DatabaseResult<u64>;

    /// Count subscribers that have not unsubscribed
    async fn count_active_subscribers(&self) -> DatabaseResult<u64>;

    /// Project the category column of every product with a non-NULL category
    async fn list_product_categories(&self) -> DatabaseResult<Vec<CategoryRow>>;

    /// Set the category of product `id`; `false` when no such product exists
    async fn update_product_category(&self, id: i64, category: &str) -> DatabaseResult<bool>;

    /// Remove product `id`; `false` when no such product exists
    async fn delete_product(&self, id: i64) -> DatabaseResult<bool>;

    /// Stored search settings, `None` before the first save
    async fn load_search_settings(&self) -> DatabaseResult<Option<SearchSettings>>;

    /// Replace the stored search settings, recording who saved them
    async fn save_search_settings(
        &self,
        settings: &SearchSettings,
        updated_by: &str,
    ) -> DatabaseResult<()>;
}
