// ABOUTME: Service layer for guarded admin operations
// ABOUTME: Hosts aggregation, product edits, settings, and cache flush plus the shared timeout helper
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Admin services
//!
//! Route handlers are thin; every rule about who may act and what an
//! upstream failure turns into lives here.

/// Catalog statistics and category listing
pub mod admin_stats;
/// Shared cache flush
pub mod cache_invalidation;
/// Product category edits and removal
pub mod product_admin;
/// Search tuning settings
pub mod search_settings;

pub use admin_stats::AdminAggregationService;
pub use cache_invalidation::{CacheInvalidationService, FlushOutcome};
pub use product_admin::ProductAdminService;
pub use search_settings::{SearchSettingsService, SETTINGS_EDITORS};

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;
use tracing::error;

use crate::errors::{AppError, AppResult};

/// Await an external call with a bound, mapping failure and timeout to
/// [`crate::errors::ErrorCode::UpstreamFailure`]
///
/// `operation` names the call in the operator log; `public_message` is
/// what the caller sees.
pub(crate) async fn bounded<T, E, F>(
    limit: Duration,
    operation: &'static str,
    public_message: &'static str,
    call: F,
) -> AppResult<T>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match timeout(limit, call).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            error!(operation, error = %e, "Upstream call failed");
            Err(AppError::upstream(public_message, format!("{operation}: {e}")))
        }
        Err(_) => {
            error!(
                operation,
                timeout_ms = limit.as_millis(),
                "Upstream call timed out"
            );
            Err(AppError::upstream(
                public_message,
                format!("{operation}: timed out"),
            ))
        }
    }
}
