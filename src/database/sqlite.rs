// ABOUTME: SQLite-backed catalog store using sqlx
// ABOUTME: Implements the admin counts, category projection, product edits, and the settings row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use tracing::{info, warn};

use super::{CatalogStore, DatabaseError, DatabaseResult};
use crate::constants::tables;
use crate::models::{CategoryRow, SearchSettings};

/// Tables read by the admin surface, created on connect when missing
const BOOTSTRAP_STATEMENTS: [&str; 4] = [
    r"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT,
        category TEXT,
        updated_at TEXT
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS search_analytics (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        query TEXT,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS email_subscribers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL,
        subscribed_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        unsubscribed_at TEXT
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS search_settings (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        similarity_threshold REAL NOT NULL,
        diversity_factor REAL NOT NULL,
        default_page_size INTEGER NOT NULL,
        max_page_size INTEGER NOT NULL,
        category_weights TEXT NOT NULL DEFAULT '{}',
        brand_boosts TEXT NOT NULL DEFAULT '{}',
        updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_by TEXT
    )
    ",
];

const UPSERT_SETTINGS: &str = r"
    INSERT INTO search_settings (
        id, similarity_threshold, diversity_factor, default_page_size,
        max_page_size, category_weights, brand_boosts, updated_at, updated_by
    )
    VALUES (1, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, ?)
    ON CONFLICT(id) DO UPDATE SET
        similarity_threshold = excluded.similarity_threshold,
        diversity_factor = excluded.diversity_factor,
        default_page_size = excluded.default_page_size,
        max_page_size = excluded.max_page_size,
        category_weights = excluded.category_weights,
        brand_boosts = excluded.brand_boosts,
        updated_at = CURRENT_TIMESTAMP,
        updated_by = excluded.updated_by
";

/// Catalog store over a `SQLite` pool
#[derive(Clone)]
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    /// Connect to `database_url` and ensure the read tables exist
    ///
    /// In-memory URLs are pinned to a single connection so every query sees
    /// the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or bootstrap fails
    pub async fn connect(database_url: &str) -> DatabaseResult<Self> {
        let in_memory = database_url.contains(":memory:");
        let connection_url = if in_memory || database_url.contains("mode=") {
            database_url.to_owned()
        } else {
            let separator = if database_url.contains('?') { '&' } else { '?' };
            format!("{database_url}{separator}mode=rwc")
        };

        let options = if in_memory {
            // Closing the only connection would discard the database
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = options
            .connect(&connection_url)
            .await
            .map_err(|e| DatabaseError::ConnectionError {
                context: format!("Failed to connect to {database_url}: {e}"),
            })?;

        let store = Self { pool };
        store.bootstrap().await?;
        info!(in_memory, "Catalog store connected");
        Ok(store)
    }

    /// Wrap an existing pool without bootstrapping
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Underlying pool, for seeding and maintenance
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn bootstrap(&self) -> DatabaseResult<()> {
        for statement in BOOTSTRAP_STATEMENTS {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| DatabaseError::ConnectionError {
                    context: format!("Bootstrap failed: {e}"),
                })?;
        }
        Ok(())
    }

    async fn count(&self, table: &str, filter: Option<&str>) -> DatabaseResult<u64> {
        let sql = filter.map_or_else(
            || format!("SELECT COUNT(*) AS total FROM {table}"),
            |clause| format!("SELECT COUNT(*) AS total FROM {table} WHERE {clause}"),
        );

        let row = sqlx::query(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: format!("Count on {table} failed: {e}"),
            })?;

        let total: Option<i64> = match row {
            Some(row) => row
                .try_get("total")
                .map_err(|e| DatabaseError::DecodeError {
                    context: format!("Count on {table} returned an unexpected value: {e}"),
                })?,
            None => None,
        };

        u64::try_from(total.unwrap_or(0)).map_err(|e| DatabaseError::DecodeError {
            context: format!("Count on {table} was negative: {e}"),
        })
    }
}

fn decode_category_row(row: &SqliteRow) -> Option<CategoryRow> {
    match row.try_get::<Option<String>, _>("category") {
        Ok(category) => Some(CategoryRow { category }),
        Err(e) => {
            warn!(error = %e, "Skipping product row with non-text category");
            None
        }
    }
}

fn decode_settings(row: &SqliteRow) -> DatabaseResult<SearchSettings> {
    let decode_err = |e: &dyn fmt::Display| DatabaseError::DecodeError {
        context: format!("Stored search settings are malformed: {e}"),
    };

    let page_size = |column: &str| -> DatabaseResult<u32> {
        let raw: i64 = row.try_get(column).map_err(|e| decode_err(&e))?;
        u32::try_from(raw).map_err(|e| decode_err(&e))
    };
    let weights = |column: &str| -> DatabaseResult<BTreeMap<String, f64>> {
        let raw: String = row.try_get(column).map_err(|e| decode_err(&e))?;
        serde_json::from_str::<Option<BTreeMap<String, f64>>>(&raw)
            .map(Option::unwrap_or_default)
            .map_err(|e| decode_err(&e))
    };

    Ok(SearchSettings {
        similarity_threshold: row
            .try_get("similarity_threshold")
            .map_err(|e| decode_err(&e))?,
        diversity_factor: row
            .try_get("diversity_factor")
            .map_err(|e| decode_err(&e))?,
        default_page_size: page_size("default_page_size")?,
        max_page_size: page_size("max_page_size")?,
        category_weights: weights("category_weights")?,
        brand_boosts: weights("brand_boosts")?,
    })
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn count_products(&self) -> DatabaseResult<u64> {
        self.count(tables::PRODUCTS, None).await
    }

    async fn count_searches(&self) -> DatabaseResult<u64> {
        self.count(tables::SEARCH_ANALYTICS, None).await
    }

    async fn count_active_subscribers(&self) -> DatabaseResult<u64> {
        self.count(tables::EMAIL_SUBSCRIBERS, Some("unsubscribed_at IS NULL"))
            .await
    }

    async fn list_product_categories(&self) -> DatabaseResult<Vec<CategoryRow>> {
        let rows = sqlx::query("SELECT category FROM products WHERE category IS NOT NULL")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: format!("Category query failed: {e}"),
            })?;

        Ok(rows.iter().filter_map(decode_category_row).collect())
    }

    async fn update_product_category(&self, id: i64, category: &str) -> DatabaseResult<bool> {
        let result = sqlx::query(
            "UPDATE products SET category = ?, updated_at = CURRENT_TIMESTAMP WHERE id = ?",
        )
        .bind(category)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DatabaseError::QueryError {
            context: format!("Category update for product {id} failed: {e}"),
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_product(&self, id: i64) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: format!("Delete of product {id} failed: {e}"),
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn load_search_settings(&self) -> DatabaseResult<Option<SearchSettings>> {
        let row = sqlx::query(
            "SELECT similarity_threshold, diversity_factor, default_page_size, max_page_size, \
             category_weights, brand_boosts FROM search_settings WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DatabaseError::QueryError {
            context: format!("Settings query failed: {e}"),
        })?;

        row.as_ref().map(decode_settings).transpose()
    }

    async fn save_search_settings(
        &self,
        settings: &SearchSettings,
        updated_by: &str,
    ) -> DatabaseResult<()> {
        let encode_err = |e: serde_json::Error| DatabaseError::DecodeError {
            context: format!("Settings weights could not be encoded: {e}"),
        };
        let category_weights =
            serde_json::to_string(&settings.category_weights).map_err(encode_err)?;
        let brand_boosts = serde_json::to_string(&settings.brand_boosts).map_err(encode_err)?;

        sqlx::query(UPSERT_SETTINGS)
            .bind(settings.similarity_threshold)
            .bind(settings.diversity_factor)
            .bind(i64::from(settings.default_page_size))
            .bind(i64::from(settings.max_page_size))
            .bind(category_weights)
            .bind(brand_boosts)
            .bind(updated_by)
            .execute(&self.pool)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: format!("Settings upsert failed: {e}"),
            })?;

        Ok(())
    }
}
