// ABOUTME: Structured logging setup on top of tracing-subscriber
// ABOUTME: Supports pretty and JSON output with RUST_LOG driven filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence; otherwise the filter falls back to `info`
/// with sqlx statement logging quieted.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed
pub fn init(format: LogFormat) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},sqlx=warn", defaults::LOG_FILTER)));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_target(true).with_thread_ids(false))
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(false),
            )
            .try_init(),
    };

    result.map_err(|e| AppError::internal(format!("Failed to initialize logging: {e}")))
}
