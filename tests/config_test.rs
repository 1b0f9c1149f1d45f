// ABOUTME: Tests for environment-driven server configuration
// ABOUTME: Runs serially because each case mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;
use std::time::Duration;

use catalog_admin_server::config::{LogFormat, ServerConfig};
use catalog_admin_server::errors::ErrorCode;
use serial_test::serial;

const VARS: [&str; 8] = [
    "HTTP_PORT",
    "DATABASE_URL",
    "REDIS_URL",
    "SESSION_JWT_SECRET",
    "UPSTREAM_TIMEOUT_SECS",
    "REQUIRE_AUTH_FOR_CACHE_CLEAR",
    "LOGIN_PATH",
    "LOG_FORMAT",
];

fn reset_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_with_only_secret() {
    reset_env();
    env::set_var("SESSION_JWT_SECRET", "s3cret");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8081);
    assert_eq!(config.database_url, "sqlite:./data/catalog.db");
    assert!(config.redis_url.is_none());
    assert_eq!(config.upstream_timeout, Duration::from_secs(5));
    assert!(!config.require_auth_for_cache_clear);
    assert_eq!(config.login_path, "/login");
    assert_eq!(config.log_format, LogFormat::Pretty);
}

#[test]
#[serial]
fn test_missing_secret_is_config_error() {
    reset_env();

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigError);
    assert!(err.message.contains("SESSION_JWT_SECRET"));

    env::set_var("SESSION_JWT_SECRET", "   ");
    assert!(ServerConfig::from_env().is_err());
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    reset_env();
    env::set_var("SESSION_JWT_SECRET", "s3cret");
    env::set_var("HTTP_PORT", "9090");
    env::set_var("REDIS_URL", "redis://127.0.0.1:6379/2");
    env::set_var("UPSTREAM_TIMEOUT_SECS", "2");
    env::set_var("REQUIRE_AUTH_FOR_CACHE_CLEAR", "true");
    env::set_var("LOGIN_PATH", "/auth/sign-in");
    env::set_var("LOG_FORMAT", "json");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 9090);
    assert_eq!(config.redis_url.as_deref(), Some("redis://127.0.0.1:6379/2"));
    assert_eq!(config.upstream_timeout, Duration::from_secs(2));
    assert!(config.require_auth_for_cache_clear);
    assert_eq!(config.login_path, "/auth/sign-in");
    assert_eq!(config.log_format, LogFormat::Json);
    reset_env();
}

#[test]
#[serial]
fn test_blank_redis_url_means_no_cache() {
    reset_env();
    env::set_var("SESSION_JWT_SECRET", "s3cret");
    env::set_var("REDIS_URL", "  ");

    assert!(ServerConfig::from_env().unwrap().redis_url.is_none());
    reset_env();
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    let cases = [
        ("HTTP_PORT", "not-a-port"),
        ("UPSTREAM_TIMEOUT_SECS", "0"),
        ("REQUIRE_AUTH_FOR_CACHE_CLEAR", "maybe"),
        ("LOGIN_PATH", "login"),
        ("LOGIN_PATH", "/login?next=/admin"),
        ("LOGIN_PATH", "//evil.example/login"),
        ("LOGIN_PATH", "/\\evil.example"),
        ("LOG_FORMAT", "xml"),
    ];

    for (var, value) in cases {
        reset_env();
        env::set_var("SESSION_JWT_SECRET", "s3cret");
        env::set_var(var, value);

        let err = ServerConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError, "{var}={value}");
    }
    reset_env();
}

#[test]
#[serial]
fn test_debug_output_redacts_secret() {
    reset_env();
    env::set_var("SESSION_JWT_SECRET", "do-not-print-me");

    let rendered = format!("{:?}", ServerConfig::from_env().unwrap());
    assert!(!rendered.contains("do-not-print-me"));
    assert!(rendered.contains("[REDACTED]"));
    reset_env();
}

#[test]
#[serial]
fn test_login_path_cannot_point_off_site() {
    reset_env();
    env::set_var("SESSION_JWT_SECRET", "s3cret");

    for target in ["//evil.example", "//evil.example/login", "/\\evil.example"] {
        env::set_var("LOGIN_PATH", target);
        let err = ServerConfig::from_env().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError, "{target}");
    }

    env::set_var("LOGIN_PATH", "/auth//login");
    assert_eq!(ServerConfig::from_env().unwrap().login_path, "/auth//login");
    reset_env();
}
