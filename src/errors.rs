// ABOUTME: Unified error type and HTTP response mapping for the admin control plane
// ABOUTME: Maps every failure to a stable `{ error }` envelope without leaking internal detail
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Error handling
//!
//! Every operation in this crate returns [`AppResult`]. The [`ErrorCode`]
//! decides the HTTP status and the public message; anything carried in
//! `internal` is for operators only and is written to the log, never to
//! the response body.

use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

/// Result alias used across the crate
pub type AppResult<T> = Result<T, AppError>;

/// Stable error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// No valid session was presented
    AuthRequired,
    /// A valid session lacks the required role
    PermissionDenied,
    /// The addressed record does not exist
    NotFound,
    /// A required external resource is not configured
    ServiceUnavailable,
    /// An external store or cache call failed or timed out
    UpstreamFailure,
    /// Caller supplied malformed input
    InvalidInput,
    /// Server configuration is missing or invalid
    ConfigError,
    /// Unexpected internal failure
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this code
    #[must_use]
    pub const fn http_status(self) -> StatusCode {
        match self {
            Self::AuthRequired => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::UpstreamFailure | Self::ConfigError | Self::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to callers
    #[must_use]
    pub const fn public_message(self) -> &'static str {
        match self {
            Self::AuthRequired => "Unauthorized",
            Self::PermissionDenied => "Forbidden",
            Self::NotFound => "Not found",
            Self::ServiceUnavailable => "Service unavailable",
            Self::UpstreamFailure => "Upstream request failed",
            Self::InvalidInput => "Invalid request",
            Self::ConfigError | Self::InternalError => "Internal server error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AuthRequired => "auth_required",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::ServiceUnavailable => "service_unavailable",
            Self::UpstreamFailure => "upstream_failure",
            Self::InvalidInput => "invalid_input",
            Self::ConfigError => "config_error",
            Self::InternalError => "internal_error",
        };
        f.write_str(name)
    }
}

/// Application error
#[derive(Debug, Clone, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// Error classification
    pub code: ErrorCode,
    /// Caller-facing message
    pub message: String,
    /// Operator-facing detail, logged but never serialized
    pub internal: Option<String>,
}

impl AppError {
    /// Create an error with an explicit code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            internal: None,
        }
    }

    /// Attach operator-facing detail
    #[must_use]
    pub fn with_internal(mut self, detail: impl Into<String>) -> Self {
        self.internal = Some(detail.into());
        self
    }

    /// No valid session (401)
    pub fn unauthenticated() -> Self {
        Self::new(
            ErrorCode::AuthRequired,
            ErrorCode::AuthRequired.public_message(),
        )
    }

    /// Session present but role mismatch (403)
    pub fn forbidden() -> Self {
        Self::new(
            ErrorCode::PermissionDenied,
            ErrorCode::PermissionDenied.public_message(),
        )
    }

    /// Addressed record missing (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Required external resource not configured (503)
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// External call failed; `detail` is kept for the log only (500)
    pub fn upstream(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamFailure, message).with_internal(detail)
    }

    /// Malformed caller input (400)
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Invalid configuration
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Unexpected internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// HTTP status for this error
    #[must_use]
    pub const fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();

        // Upstream detail is logged where the failure is caught; only internal
        // errors without a prior log site are reported here.
        match self.code {
            ErrorCode::ConfigError | ErrorCode::InternalError => error!(
                code = %self.code,
                detail = self.internal.as_deref().unwrap_or_default(),
                "{}", self.message
            ),
            _ => debug!(code = %self.code, status = status.as_u16(), "Request rejected"),
        }

        // Config and internal failures only ever expose the generic message
        let message = match self.code {
            ErrorCode::ConfigError | ErrorCode::InternalError => {
                self.code.public_message().to_owned()
            }
            _ => self.message,
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
