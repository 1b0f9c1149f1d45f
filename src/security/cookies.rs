// ABOUTME: Request credential extraction from Authorization headers and cookies
// ABOUTME: Locates the session token without interpreting it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Credential extraction
//!
//! The session token may arrive as `Authorization: Bearer <token>` or in the
//! `session_token` cookie. The header wins when both are present. The token
//! itself stays opaque here; verification is the resolver's job.

use axum::http::{header, HeaderMap};

use crate::constants::credentials::{BEARER_PREFIX, SESSION_COOKIE};

/// Extract cookie value from request headers
///
/// Every `Cookie` header is searched; the first cookie named
/// `cookie_name` with a non-empty value is returned.
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| raw.split(';'))
        .find_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            let value = value.trim();
            (name.trim() == cookie_name && !value.is_empty()).then(|| value.to_owned())
        })
}

/// Extract a bearer token from the `Authorization` header
#[must_use]
pub fn get_bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = raw.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

/// Extract the session token, preferring the header over the cookie
#[must_use]
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    get_bearer_token(headers).or_else(|| get_cookie_value(headers, SESSION_COOKIE))
}
