// ABOUTME: Model Context Protocol (MCP) implementation exposing WHOOP data as tools
// ABOUTME: JSON-RPC messages, tool schemas, typed tool dispatch, and the stdio transport
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// JSON-RPC method routing
pub mod mcp_request_processor;
/// JSON-RPC request, response, and error types
pub mod protocol;
/// Tool descriptors and MCP result shapes
pub mod schema;
/// Tool call execution against the WHOOP client
pub mod tool_handlers;
/// Typed tool arguments
pub mod tools;
/// stdio transport
pub mod transport_manager;

pub use mcp_request_processor::McpRequestProcessor;
pub use protocol::{McpError, McpRequest, McpResponse};
pub use schema::{get_tools, ToolResponse};
pub use tool_handlers::ToolHandlers;
pub use tools::WhoopTool;
pub use transport_manager::StdioTransport;
