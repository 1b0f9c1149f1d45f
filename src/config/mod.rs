// ABOUTME: Configuration module organization
// ABOUTME: Environment-only configuration for the admin control plane server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

/// Environment-driven server configuration
pub mod environment;

pub use environment::{LogFormat, ServerConfig};
