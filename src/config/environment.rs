// ABOUTME: Server configuration loaded from environment variables
// ABOUTME: Covers listen port, store and cache URLs, session secret, timeouts, and guard policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! Environment-only configuration
//!
//! Every setting has a default except the session secret. A missing or
//! blank `REDIS_URL` means the deployment has no cache, which is a valid
//! state: the cache flush endpoint then answers 503.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{defaults, env_vars, routes};
use crate::errors::{AppError, AppResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable multi-line output
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(AppError::config(format!(
                "Invalid {}: {other}. Supported: pretty, json",
                env_vars::LOG_FORMAT
            ))),
        }
    }
}

/// Complete server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Catalog database URL
    pub database_url: String,
    /// Redis URL; `None` leaves the cache unconfigured
    pub redis_url: Option<String>,
    /// HS256 secret shared with the external session issuer
    pub session_jwt_secret: String,
    /// Bound applied to each external call
    pub upstream_timeout: Duration,
    /// Run the admin guard in front of the cache flush
    pub require_auth_for_cache_clear: bool,
    /// Canonical login path targeted by the redirect entry point
    pub login_path: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("http_port", &self.http_port)
            .field("database_url", &self.database_url)
            .field("redis_configured", &self.redis_url.is_some())
            .field("session_jwt_secret", &"[REDACTED]")
            .field("upstream_timeout", &self.upstream_timeout)
            .field(
                "require_auth_for_cache_clear",
                &self.require_auth_for_cache_clear,
            )
            .field("login_path", &self.login_path)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns a config error if:
    /// - `SESSION_JWT_SECRET` is missing or blank
    /// - A numeric or boolean variable does not parse
    /// - `LOGIN_PATH` is not an absolute path
    pub fn from_env() -> AppResult<Self> {
        let http_port = parse_var(env_vars::HTTP_PORT, defaults::HTTP_PORT)?;
        let database_url = optional_var(env_vars::DATABASE_URL)
            .unwrap_or_else(|| defaults::DATABASE_URL.to_owned());
        let redis_url = optional_var(env_vars::REDIS_URL);

        let session_jwt_secret = optional_var(env_vars::SESSION_JWT_SECRET).ok_or_else(|| {
            AppError::config(format!("{} must be set", env_vars::SESSION_JWT_SECRET))
        })?;

        let timeout_secs = parse_var(
            env_vars::UPSTREAM_TIMEOUT_SECS,
            defaults::UPSTREAM_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(AppError::config(format!(
                "{} must be greater than zero",
                env_vars::UPSTREAM_TIMEOUT_SECS
            )));
        }

        let require_auth_for_cache_clear =
            parse_bool_var(env_vars::REQUIRE_AUTH_FOR_CACHE_CLEAR, false)?;

        let login_path = optional_var(env_vars::LOGIN_PATH)
            .unwrap_or_else(|| routes::DEFAULT_LOGIN_PATH.to_owned());
        if !is_local_path(&login_path) {
            return Err(AppError::config(format!(
                "{} must be a local absolute path without a query string",
                env_vars::LOGIN_PATH
            )));
        }

        let log_format = optional_var(env_vars::LOG_FORMAT)
            .map(|v| v.parse())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            http_port,
            database_url,
            redis_url,
            session_jwt_secret,
            upstream_timeout: Duration::from_secs(timeout_secs),
            require_auth_for_cache_clear,
            login_path,
            log_format,
        })
    }
}

/// A same-origin path: one leading slash, no authority, no query
fn is_local_path(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.starts_with("/\\")
        && !path.contains('?')
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional_var(name).map_or(Ok(default), |raw| {
        raw.parse()
            .map_err(|e| AppError::config(format!("Invalid {name}={raw}: {e}")))
    })
}

fn parse_bool_var(name: &str, default: bool) -> AppResult<bool> {
    let Some(raw) = optional_var(name) else {
        return Ok(default);
    };
    match raw.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!(
            "Invalid {name}={raw}: expected true or false"
        ))),
    }
}
