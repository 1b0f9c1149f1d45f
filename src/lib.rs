// ABOUTME: Main library entry point for the catalog admin control plane
// ABOUTME: Provides the session guard, admin catalog operations, and cache invalidation over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

#![deny(unsafe_code)]

//! # Catalog Admin Server
//!
//! Privileged operations for a product catalog and search application:
//! aggregate statistics, the distinct category listing, product category
//! edits and removal, search settings, and a shared cache flush. Every
//! admin operation passes through the same gate: the caller's
//! session is resolved, then the role is checked, and only then does the
//! operation touch a store.
//!
//! ## Architecture
//!
//! - **Auth**: session resolution from bearer header or cookie
//! - **Permissions**: pure role authorization
//! - **Services**: aggregation, product edits, settings, and cache
//!   invalidation, each owning its gate
//! - **Routes**: thin axum handlers and the response envelope
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use catalog_admin_server::config::ServerConfig;
//! use catalog_admin_server::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     catalog_admin_server::server::run(config).await
//! }
//! ```

/// Session resolution and the request-scoped guard
pub mod auth;

/// Cache abstraction layer with pluggable backends
pub mod cache;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// Catalog data store abstraction
pub mod database;

/// Unified error handling with stable HTTP responses
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Domain value types
pub mod models;

/// Role model and authorization decisions
pub mod permissions;

/// Shared handles passed to route handlers
pub mod resources;

/// `HTTP` routes
pub mod routes;

/// Credential extraction helpers
pub mod security;

/// Server bootstrap
pub mod server;

/// Guarded admin services
pub mod services;
