// ABOUTME: Session resolution seam and the request-scoped session guard
// ABOUTME: Turns inbound credential material into an optional Session with a bounded wait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Authentication
//!
//! A [`SessionResolver`] maps opaque credential material to a [`Session`].
//! "No session" is an ordinary outcome (`Ok(None)`); only a failure of the
//! resolver's own backend is an error. [`SessionGuard`] wraps a resolver
//! with the upstream timeout and is the single entry point handlers use.

/// HS256 session token verification
pub mod jwt;

pub use jwt::{JwtSessionResolver, SessionClaims};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::HeaderMap;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, error};

use crate::constants::messages;
use crate::errors::{AppError, AppResult};
use crate::models::Session;
use crate::security::session_token;

/// Credential material taken from an inbound request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCredentials {
    /// Opaque session token, if one was presented
    pub token: Option<String>,
}

impl RequestCredentials {
    /// Collect credentials from request headers
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            token: session_token(headers),
        }
    }

    /// Credentials carrying a token
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
        }
    }

    /// Credentials carrying nothing
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { token: None }
    }
}

/// Failure of the resolver's backing service
#[derive(Debug, Error)]
pub enum SessionError {
    /// Backing session store could not be reached
    #[error("Session backend unavailable: {0}")]
    Backend(String),
}

/// Resolves caller identity from credential material
#[async_trait]
pub trait SessionResolver: Send + Sync {
    /// Resolve a session
    ///
    /// Returns `Ok(None)` when no credential is present or the credential is
    /// invalid or expired.
    ///
    /// # Errors
    ///
    /// Returns an error only when the resolver's backend fails.
    async fn resolve(
        &self,
        credentials: &RequestCredentials,
    ) -> Result<Option<Session>, SessionError>;
}

/// Request-scoped authentication front door
#[derive(Clone)]
pub struct SessionGuard {
    resolver: Arc<dyn SessionResolver>,
    timeout: Duration,
}

impl SessionGuard {
    /// Create a guard around `resolver`
    pub fn new(resolver: Arc<dyn SessionResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Resolve the caller's session from request headers
    ///
    /// # Errors
    ///
    /// Returns an upstream failure if the resolver errors or exceeds the
    /// configured timeout.
    pub async fn authenticate(&self, headers: &HeaderMap) -> AppResult<Option<Session>> {
        self.resolve(&RequestCredentials::from_headers(headers))
            .await
    }

    /// Resolve the caller's session from collected credentials
    ///
    /// # Errors
    ///
    /// Returns an upstream failure if the resolver errors or exceeds the
    /// configured timeout.
    pub async fn resolve(&self, credentials: &RequestCredentials) -> AppResult<Option<Session>> {
        if credentials.token.is_none() {
            debug!("No session credential presented");
            return Ok(None);
        }

        match timeout(self.timeout, self.resolver.resolve(credentials)).await {
            Ok(Ok(session)) => Ok(session.filter(|s| s.valid)),
            Ok(Err(e)) => {
                error!(error = %e, "Session resolution failed");
                Err(AppError::upstream(messages::SESSION_FAILED, e.to_string()))
            }
            Err(_) => {
                error!(timeout_ms = self.timeout.as_millis(), "Session resolution timed out");
                Err(AppError::upstream(
                    messages::SESSION_FAILED,
                    "session resolver timed out",
                ))
            }
        }
    }
}
