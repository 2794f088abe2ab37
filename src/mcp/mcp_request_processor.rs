// ABOUTME: MCP request processor routing JSON-RPC methods to their handlers
// ABOUTME: Validates requests and builds responses for initialize, ping, tools/list and tools/call
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info, warn};
use whoop_core::constants::protocol::JSONRPC_VERSION;

use super::protocol::{McpError, McpRequest, McpResponse};
use super::schema::{tools_list_result, InitializeResponse};
use super::tool_handlers::ToolHandlers;

/// Processes MCP protocol requests
#[derive(Clone)]
pub struct McpRequestProcessor {
    handlers: ToolHandlers,
}

impl McpRequestProcessor {
    /// Create a new MCP request processor
    #[must_use]
    pub const fn new(handlers: ToolHandlers) -> Self {
        Self { handlers }
    }

    /// Handle an MCP request and return a response.
    ///
    /// Notifications produce `None`; everything else gets exactly one response.
    pub async fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        let start = Instant::now();
        Self::log_request(&request);

        if request.is_notification() {
            Self::handle_notification(&request);
            return None;
        }

        let response = self.process_request(&request).await;

        debug!(
            "MCP request {} completed in {}ms",
            request.method,
            start.elapsed().as_millis()
        );
        Some(response)
    }

    async fn process_request(&self, request: &McpRequest) -> McpResponse {
        if let Err(error) = Self::validate_request(request) {
            warn!("Rejected MCP request {}: {}", request.method, error.message);
            return McpResponse::error(request.id.clone(), error);
        }

        match request.method.as_str() {
            "initialize" => Self::handle_initialize(request),
            "ping" => Self::handle_ping(request),
            "tools/list" => Self::handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => Self::handle_unknown_method(request),
        }
    }

    fn validate_request(request: &McpRequest) -> Result<(), McpError> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(McpError::invalid_request(format!(
                "Invalid JSON-RPC version: expected {JSONRPC_VERSION}, got {}",
                request.jsonrpc
            )));
        }
        if request.method.is_empty() {
            return Err(McpError::invalid_request("Missing method"));
        }
        Ok(())
    }

    fn handle_initialize(request: &McpRequest) -> McpResponse {
        debug!("Handling initialize request");
        match serde_json::to_value(InitializeResponse::default()) {
            Ok(result) => McpResponse::success(request.id.clone(), result),
            Err(e) => McpResponse::error(
                request.id.clone(),
                McpError::internal(format!("Failed to serialize initialize response: {e}")),
            ),
        }
    }

    fn handle_ping(request: &McpRequest) -> McpResponse {
        debug!("Handling ping request");
        McpResponse::success(request.id.clone(), serde_json::json!({}))
    }

    fn handle_tools_list(request: &McpRequest) -> McpResponse {
        debug!("Handling tools/list request");
        McpResponse::success(request.id.clone(), tools_list_result())
    }

    async fn handle_tools_call(&self, request: &McpRequest) -> McpResponse {
        let params = request.params.as_ref();
        let Some(name) = params.and_then(|p| p.get("name")).and_then(Value::as_str) else {
            return McpResponse::error(
                request.id.clone(),
                McpError::invalid_params("Missing tool name for tools/call"),
            );
        };
        let arguments = params.and_then(|p| p.get("arguments"));

        let response = self.handlers.handle_tool_call(name, arguments).await;
        match serde_json::to_value(&response) {
            Ok(result) => McpResponse::success(request.id.clone(), result),
            Err(e) => McpResponse::error(
                request.id.clone(),
                McpError::internal(format!("Failed to serialize tool response: {e}")),
            ),
        }
    }

    fn handle_unknown_method(request: &McpRequest) -> McpResponse {
        warn!("Unknown MCP method: {}", request.method);
        McpResponse::error(request.id.clone(), McpError::method_not_found(&request.method))
    }

    fn handle_notification(request: &McpRequest) {
        match request.method.as_str() {
            "notifications/initialized" => info!("MCP client initialized"),
            "notifications/cancelled" => debug!("Client cancelled a request"),
            other => debug!("Ignoring notification {other}"),
        }
    }

    fn log_request(request: &McpRequest) {
        let params = request
            .params
            .as_ref()
            .map(Value::to_string)
            .unwrap_or_default();
        let preview: String = params.chars().take(100).collect();
        debug!(
            "Processing MCP request: method={}, id={:?}, params={}",
            request.method, request.id, preview
        );
    }
}
