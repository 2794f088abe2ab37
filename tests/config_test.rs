// ABOUTME: Integration tests for loading WHOOP configuration from the process environment
// ABOUTME: Serialized because each test rewrites WHOOP_* variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::env;
use std::path::PathBuf;

use serial_test::serial;
use whoop_mcp_server::config::WhoopConfig;
use whoop_mcp_server::errors::ErrorCode;

const WHOOP_VARS: &[&str] = &[
    "WHOOP_CLIENT_ID",
    "WHOOP_CLIENT_SECRET",
    "WHOOP_REDIRECT_URI",
    "WHOOP_API_BASE_URL",
    "WHOOP_AUTH_URL",
    "WHOOP_TOKEN_URL",
    "WHOOP_TOKEN_FILE",
    "WHOOP_AUTH_PORT",
];

fn reset_env() {
    for var in WHOOP_VARS {
        env::remove_var(var);
    }
}

fn set_required() {
    env::set_var("WHOOP_CLIENT_ID", "env-client");
    env::set_var("WHOOP_CLIENT_SECRET", "env-secret");
    env::set_var("WHOOP_REDIRECT_URI", "http://localhost:8080/callback");
}

#[test]
#[serial]
fn test_missing_variables_named_together() {
    reset_env();

    let err = WhoopConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
    for var in &WHOOP_VARS[..3] {
        assert!(err.message.contains(var), "{var} missing from: {}", err.message);
    }
}

#[test]
#[serial]
fn test_blank_value_counts_as_missing() {
    reset_env();
    set_required();
    env::set_var("WHOOP_CLIENT_SECRET", "   ");

    let err = WhoopConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains("WHOOP_CLIENT_SECRET"));
    reset_env();
}

#[test]
#[serial]
fn test_overrides_applied() {
    reset_env();
    set_required();
    env::set_var("WHOOP_API_BASE_URL", "http://127.0.0.1:9999/developer/v2/");
    env::set_var("WHOOP_TOKEN_FILE", "/tmp/whoop/tokens.json");
    env::set_var("WHOOP_AUTH_PORT", "8080");

    let config = WhoopConfig::from_env().unwrap();
    assert_eq!(config.api.client_id, "env-client");
    assert_eq!(config.api.redirect_uri, "http://localhost:8080/callback");
    assert_eq!(
        config.api.endpoints.api_base_url,
        "http://127.0.0.1:9999/developer/v2"
    );
    assert_eq!(
        config.api.endpoints.token_url,
        "https://api.prod.whoop.com/oauth/oauth2/token"
    );
    assert_eq!(config.token_file, PathBuf::from("/tmp/whoop/tokens.json"));
    assert_eq!(config.auth_port, 8080);
    reset_env();
}

#[test]
#[serial]
fn test_invalid_values_rejected() {
    reset_env();
    set_required();

    env::set_var("WHOOP_AUTH_PORT", "70000");
    let err = WhoopConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("WHOOP_AUTH_PORT"));

    env::remove_var("WHOOP_AUTH_PORT");
    env::set_var("WHOOP_AUTH_URL", "not a url");
    let err = WhoopConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("WHOOP_AUTH_URL"));
    reset_env();
}
