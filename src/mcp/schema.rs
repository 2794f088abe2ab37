// ABOUTME: MCP protocol schema definitions and tool descriptors for the WHOOP tool set
// ABOUTME: Tool input schemas, tool response envelopes, and the initialize response
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! MCP Protocol Schema Definitions
//!
//! Type-safe definitions of the MCP messages this server sends, and the input
//! schema of every WHOOP tool served by `tools/list`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use whoop_core::constants::protocol::{MCP_PROTOCOL_VERSION, SERVER_NAME};
use whoop_core::constants::tools::{
    ARG_ACCESS_TOKEN, ARG_CODE, ARG_CYCLE_ID, ARG_END, ARG_LIMIT, ARG_NEXT_TOKEN,
    ARG_REFRESH_TOKEN, ARG_SLEEP_ID, ARG_START, ARG_WORKOUT_ID, EXCHANGE_CODE_FOR_TOKEN,
    GET_AUTHORIZATION_URL, GET_CYCLE_BY_ID, GET_CYCLE_COLLECTION, GET_RECOVERY_COLLECTION,
    GET_RECOVERY_FOR_CYCLE, GET_SLEEP_BY_ID, GET_SLEEP_COLLECTION, GET_SLEEP_FOR_CYCLE,
    GET_USER_BODY_MEASUREMENTS, GET_USER_PROFILE, GET_WORKOUT_BY_ID, GET_WORKOUT_COLLECTION,
    REFRESH_TOKEN, REVOKE_USER_ACCESS, SET_ACCESS_TOKEN,
};

/// Server Information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Server version
    pub version: String,
}

/// MCP Tool Schema Definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Tool name
    pub name: String,
    /// What the tool does
    pub description: String,
    /// Arguments accepted by the tool
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonSchema,
}

/// JSON Schema Definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSchema {
    /// Always `object`
    #[serde(rename = "type")]
    pub schema_type: String,
    /// Argument schemas keyed by name
    pub properties: BTreeMap<String, PropertySchema>,
    /// Names of the required arguments
    pub required: Vec<String>,
}

/// JSON Schema Property Definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySchema {
    /// JSON type (`number`, `string`)
    #[serde(rename = "type")]
    pub property_type: String,
    /// Argument description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Tool Response after execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    /// Response content blocks
    pub content: Vec<Content>,
    /// Whether the tool failed
    #[serde(rename = "isError")]
    pub is_error: bool,
}

impl ToolResponse {
    /// Successful single-text response
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::Text { text: text.into() }],
            is_error: false,
        }
    }

    /// Failed response carrying `Error: <message>`
    #[must_use]
    pub fn error(message: impl AsRef<str>) -> Self {
        Self {
            content: vec![Content::Text {
                text: format!("Error: {}", message.as_ref()),
            }],
            is_error: true,
        }
    }

    /// Text of the first content block
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|content| match content {
            Content::Text { text } => Some(text.as_str()),
        })
    }
}

/// Content types for MCP messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Content {
    /// Plain text
    #[serde(rename = "text")]
    Text {
        /// The text
        text: String,
    },
}

/// MCP Server Capabilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerCapabilities {
    /// Tool support
    pub tools: ToolsCapability,
}

/// Tools capability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolsCapability {
    /// Whether the tool list can change at runtime
    #[serde(rename = "listChanged")]
    pub list_changed: bool,
}

/// Result of `initialize`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeResponse {
    /// Protocol revision spoken by this server
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    /// Server identity
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
    /// Supported capabilities
    pub capabilities: ServerCapabilities,
    /// Usage hint for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl Default for InitializeResponse {
    fn default() -> Self {
        Self {
            protocol_version: MCP_PROTOCOL_VERSION.to_owned(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
            },
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            instructions: Some(
                "WHOOP data tools. Authenticate with `whoop-auth` first, or call \
                 `whoop-set-access-token` with a token you already have."
                    .to_owned(),
            ),
        }
    }
}

/// Get all available tools
#[must_use]
pub fn get_tools() -> Vec<ToolSchema> {
    vec![
        // User
        no_args_tool(
            GET_USER_PROFILE,
            "Get basic user profile information (name, email) for the authenticated user",
        ),
        no_args_tool(
            GET_USER_BODY_MEASUREMENTS,
            "Get body measurements (height, weight, max heart rate) for the authenticated user",
        ),
        no_args_tool(REVOKE_USER_ACCESS, "Revoke the access token granted by the user"),
        // Cycles
        cycle_id_tool(
            GET_CYCLE_BY_ID,
            "Get the cycle for the specified ID",
            "ID of the cycle to retrieve",
        ),
        collection_tool(
            GET_CYCLE_COLLECTION,
            "Get all physiological cycles for a user, paginated",
            "cycles",
        ),
        cycle_id_tool(
            GET_SLEEP_FOR_CYCLE,
            "Get sleep data for a specific cycle",
            "ID of the cycle to get sleep data for",
        ),
        // Recovery
        collection_tool(
            GET_RECOVERY_COLLECTION,
            "Get all recovery data for a user, paginated",
            "recovery records",
        ),
        cycle_id_tool(
            GET_RECOVERY_FOR_CYCLE,
            "Get recovery data for a specific cycle",
            "ID of the cycle to get recovery data for",
        ),
        // Sleep
        string_arg_tool(
            GET_SLEEP_BY_ID,
            "Get the sleep record for the specified ID",
            ARG_SLEEP_ID,
            "ID of the sleep record to retrieve",
        ),
        collection_tool(
            GET_SLEEP_COLLECTION,
            "Get all sleep records for a user, paginated",
            "sleep records",
        ),
        // Workouts
        string_arg_tool(
            GET_WORKOUT_BY_ID,
            "Get the workout record for the specified ID",
            ARG_WORKOUT_ID,
            "ID of the workout record to retrieve",
        ),
        collection_tool(
            GET_WORKOUT_COLLECTION,
            "Get all workout records for a user, paginated",
            "workout records",
        ),
        // OAuth
        no_args_tool(GET_AUTHORIZATION_URL, "Get the authorization URL for OAuth flow"),
        string_arg_tool(
            EXCHANGE_CODE_FOR_TOKEN,
            "Exchange authorization code for access token",
            ARG_CODE,
            "Authorization code from OAuth callback",
        ),
        string_arg_tool(
            REFRESH_TOKEN,
            "Refresh access token using refresh token",
            ARG_REFRESH_TOKEN,
            "Refresh token to use for getting new access token",
        ),
        string_arg_tool(
            SET_ACCESS_TOKEN,
            "Set the access token for API calls",
            ARG_ACCESS_TOKEN,
            "Access token to use for API calls",
        ),
    ]
}

/// Render the tool list as the `tools/list` result
#[must_use]
pub fn tools_list_result() -> Value {
    serde_json::json!({ "tools": get_tools() })
}

fn property(property_type: &str, description: impl Into<String>) -> PropertySchema {
    PropertySchema {
        property_type: property_type.to_owned(),
        description: Some(description.into()),
    }
}

fn tool(
    name: &str,
    description: &str,
    properties: BTreeMap<String, PropertySchema>,
    required: &[&str],
) -> ToolSchema {
    ToolSchema {
        name: name.to_owned(),
        description: description.to_owned(),
        input_schema: JsonSchema {
            schema_type: "object".to_owned(),
            properties,
            required: required.iter().map(|r| (*r).to_owned()).collect(),
        },
    }
}

fn no_args_tool(name: &str, description: &str) -> ToolSchema {
    tool(name, description, BTreeMap::new(), &[])
}

fn cycle_id_tool(name: &str, description: &str, arg_description: &str) -> ToolSchema {
    let properties = BTreeMap::from([(
        ARG_CYCLE_ID.to_owned(),
        property("number", arg_description),
    )]);
    tool(name, description, properties, &[ARG_CYCLE_ID])
}

fn string_arg_tool(
    name: &str,
    description: &str,
    arg: &str,
    arg_description: &str,
) -> ToolSchema {
    let properties = BTreeMap::from([(arg.to_owned(), property("string", arg_description))]);
    tool(name, description, properties, &[arg])
}

fn collection_tool(name: &str, description: &str, records: &str) -> ToolSchema {
    let properties = BTreeMap::from([
        (
            ARG_LIMIT.to_owned(),
            property(
                "number",
                format!("Limit on the number of {records} returned (max 25)"),
            ),
        ),
        (
            ARG_START.to_owned(),
            property(
                "string",
                format!("Return {records} that occurred after or during this time (ISO 8601)"),
            ),
        ),
        (
            ARG_END.to_owned(),
            property(
                "string",
                format!(
                    "Return {records} that intersect this time or ended before this time (ISO 8601)"
                ),
            ),
        ),
        (
            ARG_NEXT_TOKEN.to_owned(),
            property(
                "string",
                "Next token from the previous response to get the next page",
            ),
        ),
    ]);
    tool(name, description, properties, &[])
}
