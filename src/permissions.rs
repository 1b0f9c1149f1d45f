// ABOUTME: Role model and the pure authorization decision for privileged operations
// ABOUTME: Separates "no session" (401) from "wrong role" (403) before any store access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Role-based authorization
//!
//! [`authorize`] and [`authorize_any`] are pure functions of their inputs:
//! no I/O, no shared state, and the same arguments always yield the same
//! decision. Role matching is exact; there is no hierarchy between roles,
//! so an operation open to several roles lists each of them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::Session;

/// Caller role asserted by the session issuer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrative access
    Admin,
    /// Content editing access
    Editor,
    /// Read-only end user
    #[default]
    Viewer,
}

impl UserRole {
    /// Wire name of the role
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }

    /// Decode a role claim, falling back to [`UserRole::Viewer`]
    ///
    /// Unknown strings never grant elevated access.
    #[must_use]
    pub fn from_claim(raw: Option<&str>) -> Self {
        raw.and_then(|r| r.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" | "user" => Ok(Self::Viewer),
            other => Err(AppError::invalid_input(format!("Unknown role: {other}"))),
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Self::from_claim(raw.as_deref()))
    }
}

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// No valid session
    Unauthenticated,
    /// Session present but role mismatch
    Forbidden,
}

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    /// Operation may proceed
    Allowed,
    /// Operation must not proceed
    Denied(DenialReason),
}

impl AuthorizationDecision {
    /// Whether the decision permits the operation
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Decide whether `session` may perform an operation requiring `required`
#[must_use]
pub fn authorize(session: Option<&Session>, required: UserRole) -> AuthorizationDecision {
    authorize_any(session, &[required])
}

/// Decide whether `session` holds any one of the `allowed` roles
///
/// An empty `allowed` list forbids every valid session.
#[must_use]
pub fn authorize_any(session: Option<&Session>, allowed: &[UserRole]) -> AuthorizationDecision {
    match session {
        Some(session) if session.valid => {
            if allowed.contains(&session.role) {
                AuthorizationDecision::Allowed
            } else {
                AuthorizationDecision::Denied(DenialReason::Forbidden)
            }
        }
        _ => AuthorizationDecision::Denied(DenialReason::Unauthenticated),
    }
}

/// Run [`authorize_any`] and convert a denial into an [`AppError`]
///
/// # Errors
///
/// Returns 401 when no valid session is present and 403 when the role is
/// not in `allowed`.
pub fn require_any_role<'a>(
    session: Option<&'a Session>,
    allowed: &[UserRole],
) -> AppResult<&'a Session> {
    match (authorize_any(session, allowed), session) {
        (AuthorizationDecision::Allowed, Some(session)) => Ok(session),
        (AuthorizationDecision::Denied(DenialReason::Forbidden), _) => Err(AppError::forbidden()),
        _ => Err(AppError::unauthenticated()),
    }
}

/// Run [`authorize`] and convert a denial into an [`AppError`]
///
/// # Errors
///
/// Returns 401 when no valid session is present and 403 when the role
/// does not match.
pub fn require_role(session: Option<&Session>, required: UserRole) -> AppResult<&Session> {
    require_any_role(session, &[required])
}

/// Shorthand for [`require_role`] with [`UserRole::Admin`]
///
/// # Errors
///
/// See [`require_role`].
pub fn require_admin(session: Option<&Session>) -> AppResult<&Session> {
    require_role(session, UserRole::Admin)
}

/// Accept any valid session regardless of role
///
/// # Errors
///
/// Returns 401 when no valid session is present.
pub fn require_session(session: Option<&Session>) -> AppResult<&Session> {
    match session {
        Some(session) if session.valid => Ok(session),
        _ => Err(AppError::unauthenticated()),
    }
}
