// ABOUTME: Security module organization
// ABOUTME: Groups request credential handling used by the session guard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

/// Header and cookie credential extraction
pub mod cookies;

pub use cookies::{get_bearer_token, get_cookie_value, session_token};
