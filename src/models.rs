// ABOUTME: Domain value types for sessions, catalog statistics, and category listings
// ABOUTME: Serialized shapes here are the success payloads returned by the admin endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::permissions::UserRole;

/// Resolved caller identity
///
/// Produced per request by a [`crate::auth::SessionResolver`] and only read
/// afterwards. Expiry and signature checks belong to the issuer; `valid`
/// records the outcome of those checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque user identifier
    pub user_id: String,
    /// Role asserted by the issuer
    pub role: UserRole,
    /// Whether the credential passed the issuer's checks
    pub valid: bool,
}

impl Session {
    /// Build a valid session
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            valid: true,
        }
    }
}

/// Catalog summary counts, computed on demand
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    /// Rows in the product catalog
    pub total_products: u64,
    /// Recorded search events
    pub total_searches: u64,
    /// Subscribers that have not unsubscribed
    pub total_subscribers: u64,
}

/// One row of the category projection, decoded at the store boundary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryRow {
    /// Category label, absent when the column is NULL
    pub category: Option<String>,
}

impl CategoryRow {
    /// Row with a category label
    pub fn labelled(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }

    /// Row whose category column is NULL
    #[must_use]
    pub const fn unlabelled() -> Self {
        Self { category: None }
    }
}

/// Sorted, deduplicated set of non-empty category labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryListing {
    /// Categories in ascending byte order
    pub categories: Vec<String>,
}

impl CategoryListing {
    /// Collapse raw rows into a listing
    ///
    /// NULL and empty labels are dropped, duplicates removed, and the result
    /// sorted ascending.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = CategoryRow>,
    {
        let unique: BTreeSet<String> = rows
            .into_iter()
            .filter_map(|row| row.category)
            .filter(|category| !category.is_empty())
            .collect();

        Self {
            categories: unique.into_iter().collect(),
        }
    }

    /// Number of categories
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the listing is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Body returned after a successful cache flush
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheClearResponse {
    /// Always true on the success path
    pub success: bool,
    /// Human readable outcome
    pub message: String,
}

/// Bare acknowledgement for write endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    /// Always true on the success path
    pub success: bool,
}

impl SuccessResponse {
    /// Successful acknowledgement
    #[must_use]
    pub const fn ok() -> Self {
        Self { success: true }
    }
}

/// Category reassignment requested for one product
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryUpdate {
    /// New label; `None` when the body carried no usable category
    pub category: Option<String>,
}

impl CategoryUpdate {
    /// Decode a `{ "category": "..." }` body
    ///
    /// Malformed JSON, a missing field, a non-string value, and an empty
    /// string all decode to `category: None`.
    #[must_use]
    pub fn from_body(body: &[u8]) -> Self {
        let category = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| value.get("category")?.as_str().map(str::to_owned))
            .filter(|category| !category.is_empty());

        Self { category }
    }
}

/// Search tuning knobs read by the search service
///
/// Missing fields take their default on decode; `null` weight maps decode
/// as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchSettings {
    /// Minimum similarity for a result to be returned
    pub similarity_threshold: f64,
    /// Weight given to result diversity when ranking
    pub diversity_factor: f64,
    /// Page size when the caller does not ask for one
    pub default_page_size: u32,
    /// Upper bound on a requested page size
    pub max_page_size: u32,
    /// Per-category ranking multipliers
    #[serde(deserialize_with = "null_as_empty")]
    pub category_weights: BTreeMap<String, f64>,
    /// Per-brand ranking multipliers
    #[serde(deserialize_with = "null_as_empty")]
    pub brand_boosts: BTreeMap<String, f64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.3,
            diversity_factor: 0.1,
            default_page_size: 10,
            max_page_size: 50,
            category_weights: BTreeMap::new(),
            brand_boosts: BTreeMap::new(),
        }
    }
}

impl SearchSettings {
    /// Decode and validate a settings body
    ///
    /// # Errors
    ///
    /// Returns invalid input if the body is not a settings object or fails
    /// [`SearchSettings::validate`].
    pub fn from_body(body: &[u8]) -> AppResult<Self> {
        let settings: Self = serde_json::from_slice(body).map_err(|e| {
            AppError::invalid_input(messages::INVALID_SETTINGS).with_internal(e.to_string())
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the knobs describe a usable configuration
    ///
    /// # Errors
    ///
    /// Returns invalid input for non-finite weights, a zero page size, or a
    /// default page size above the maximum.
    pub fn validate(&self) -> AppResult<()> {
        let weights_finite = self
            .category_weights
            .values()
            .chain(self.brand_boosts.values())
            .all(|w| w.is_finite());
        if !self.similarity_threshold.is_finite()
            || !self.diversity_factor.is_finite()
            || !weights_finite
        {
            return Err(AppError::invalid_input("Settings values must be finite numbers"));
        }

        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(AppError::invalid_input(
                "defaultPageSize must be between 1 and maxPageSize",
            ));
        }
        Ok(())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, f64>>::deserialize(deserializer)?.unwrap_or_default())
}
