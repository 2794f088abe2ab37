// ABOUTME: JSON-RPC 2.0 message types used by the MCP stdio transport
// ABOUTME: McpRequest, McpResponse, and McpError with constructors for the standard error codes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use serde::{Deserialize, Serialize};
use serde_json::Value;
use whoop_core::constants::errors::{
    ERROR_INTERNAL_ERROR, ERROR_INVALID_PARAMS, ERROR_INVALID_REQUEST, ERROR_METHOD_NOT_FOUND,
    ERROR_PARSE,
};
use whoop_core::constants::protocol::JSONRPC_VERSION;

/// MCP request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpRequest {
    /// JSON-RPC version, must be `2.0`
    pub jsonrpc: String,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    /// Optional ID - notifications don't have IDs, only regular requests do
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl McpRequest {
    /// Whether the client expects no response
    #[must_use]
    pub fn is_notification(&self) -> bool {
        self.id.is_none() || self.method.starts_with("notifications/")
    }
}

/// MCP response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpResponse {
    /// Always `2.0`
    pub jsonrpc: String,
    /// Result on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Error on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
    /// Request id, `null` when the request could not be read
    pub id: Value,
}

impl McpResponse {
    /// Successful response
    #[must_use]
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            result: Some(result),
            error: None,
            id: id.unwrap_or(Value::Null),
        }
    }

    /// Error response
    #[must_use]
    pub fn error(id: Option<Value>, error: McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_owned(),
            result: None,
            error: Some(error),
            id: id.unwrap_or(Value::Null),
        }
    }
}

/// MCP error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpError {
    /// JSON-RPC error code
    pub code: i32,
    /// Error message
    pub message: String,
    /// Optional extra detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    /// Create a new MCP error
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// `-32700`: the line was not JSON
    #[must_use]
    pub fn parse_error() -> Self {
        Self::new(ERROR_PARSE, "Parse error")
    }

    /// `-32600`: JSON but not a request object
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ERROR_INVALID_REQUEST, message)
    }

    /// `-32601`: no such method
    #[must_use]
    pub fn method_not_found(method: &str) -> Self {
        Self::new(ERROR_METHOD_NOT_FOUND, format!("Unknown method: {method}"))
    }

    /// `-32602`: parameters unusable
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(ERROR_INVALID_PARAMS, message)
    }

    /// `-32603`: server-side failure
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ERROR_INTERNAL_ERROR, message)
    }
}
