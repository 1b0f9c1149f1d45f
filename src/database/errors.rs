// ABOUTME: Catalog store error types
// ABOUTME: Carries operator-facing context for connection, query, and decode failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use thiserror::Error;

/// Catalog store failure
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not open or bootstrap the database
    #[error("Database connection failed: {context}")]
    ConnectionError {
        /// Operator-facing detail
        context: String,
    },

    /// A query failed to execute
    #[error("Database query failed: {context}")]
    QueryError {
        /// Operator-facing detail
        context: String,
    },

    /// A result could not be decoded into the expected shape
    #[error("Database decode failed: {context}")]
    DecodeError {
        /// Operator-facing detail
        context: String,
    },
}

/// Result alias for store operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
