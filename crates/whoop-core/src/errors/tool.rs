// ABOUTME: Tool-specific error types for MCP tool argument validation and routing
// ABOUTME: Raised before any network call when a tool call is malformed
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use thiserror::Error;

/// Errors raised while turning a tool name and argument bag into a typed call.
///
/// None of these involve I/O: they are produced by the dispatcher before the
/// WHOOP client is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Required argument is absent or has the wrong JSON type
    #[error("{parameter} is required and must be a {expected}")]
    MissingParameter {
        /// Name of the argument
        parameter: String,
        /// JSON type the argument must have (`number`, `string`)
        expected: &'static str,
    },
    /// Optional argument is present but malformed
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the argument
        parameter: String,
        /// Reason the argument was rejected
        reason: String,
    },
    /// No tool is registered under this name
    #[error("Unknown tool: {tool_name}")]
    UnknownTool {
        /// Requested tool name
        tool_name: String,
    },
}

impl ToolError {
    /// Create a "missing or mistyped required parameter" error
    #[must_use]
    pub fn missing_parameter(parameter: impl Into<String>, expected: &'static str) -> Self {
        Self::MissingParameter {
            parameter: parameter.into(),
            expected,
        }
    }

    /// Create an "invalid parameter" error
    #[must_use]
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an "unknown tool" error
    #[must_use]
    pub fn unknown_tool(tool_name: impl Into<String>) -> Self {
        Self::UnknownTool {
            tool_name: tool_name.into(),
        }
    }
}
