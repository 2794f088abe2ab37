// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Builds WHOOP clients, MCP processors, and auth server state against a wiremock server
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]
//! Shared test utilities for `whoop_mcp_server`

use std::env;
use std::sync::{Arc, Once};

use serde_json::{json, Value};
use tracing::Level;
use whoop_mcp_server::config::{ApiConfig, WhoopEndpoints};
use whoop_mcp_server::mcp::{McpRequestProcessor, StdioTransport, ToolHandlers};
use whoop_mcp_server::providers::WhoopApiClient;
use wiremock::MockServer;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Redirect URI used by every test configuration
pub const TEST_REDIRECT_URI: &str = "http://localhost:3000/callback";

/// API configuration whose endpoints all live on `server`
pub fn api_config_for(server: &MockServer) -> ApiConfig {
    ApiConfig::new("test-client-id", "test-client-secret", TEST_REDIRECT_URI)
        .with_endpoints(WhoopEndpoints::with_base(&server.uri()))
}

/// WHOOP client pointed at `server`
pub fn client_for(server: &MockServer) -> Arc<WhoopApiClient> {
    init_test_logging();
    Arc::new(WhoopApiClient::new(api_config_for(server)))
}

/// stdio transport whose tools talk to `client`
pub fn transport_for(client: Arc<WhoopApiClient>) -> StdioTransport {
    StdioTransport::new(McpRequestProcessor::new(ToolHandlers::new(client)))
}

/// Serialized `tools/call` request line
pub fn tool_call_line(id: u64, name: &str, arguments: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
    .to_string()
}

/// Representative WHOOP cycle payload
pub fn sample_cycle(id: i64) -> Value {
    json!({
        "id": id,
        "user_id": 10129,
        "created_at": "2022-04-24T11:25:44.774Z",
        "updated_at": "2022-04-24T14:25:44.774Z",
        "start": "2022-04-24T02:25:44.774Z",
        "end": "2022-04-24T10:25:44.774Z",
        "timezone_offset": "-05:00",
        "score_state": "SCORED",
        "score": {
            "strain": 5.2951527,
            "kilojoule": 8288.297,
            "average_heart_rate": 68,
            "max_heart_rate": 141
        }
    })
}

/// Representative WHOOP profile payload
pub fn sample_profile() -> Value {
    json!({
        "user_id": 10129,
        "email": "jsmith123@whoop.com",
        "first_name": "John",
        "last_name": "Smith"
    })
}

/// Representative token endpoint payload
pub fn sample_token_response() -> Value {
    json!({
        "access_token": "fresh-access-token",
        "refresh_token": "fresh-refresh-token",
        "expires_in": 3600,
        "token_type": "bearer",
        "scope": "read:cycles offline"
    })
}
