// ABOUTME: Constants module with domain-separated organization
// ABOUTME: WHOOP endpoints, OAuth scopes, MCP tool names, and JSON-RPC codes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants grouped by domain.

/// MCP tool identifiers
pub mod tools;

/// WHOOP API and OAuth endpoints
pub mod whoop {
    /// Base URL for WHOOP developer API v2 resources
    pub const API_BASE_URL: &str = "https://api.prod.whoop.com/developer/v2";
    /// OAuth2 authorization endpoint
    pub const AUTH_URL: &str = "https://api.prod.whoop.com/oauth/oauth2/auth";
    /// OAuth2 token endpoint
    pub const TOKEN_URL: &str = "https://api.prod.whoop.com/oauth/oauth2/token";
    /// Scopes requested on every authorization URL (space-separated)
    pub const DEFAULT_SCOPES: &str =
        "read:recovery read:cycles read:workout read:sleep read:profile read:body_measurement";
}

/// Resource paths relative to the API base URL
pub mod endpoints {
    /// Basic user profile
    pub const USER_PROFILE: &str = "user/profile/basic";
    /// Body measurements
    pub const BODY_MEASUREMENT: &str = "user/measurement/body";
    /// Revoke the current user's access
    pub const USER_ACCESS: &str = "user/access";
    /// Physiological cycles
    pub const CYCLE: &str = "cycle";
    /// Recovery records
    pub const RECOVERY: &str = "recovery";
    /// Sleep activities
    pub const SLEEP: &str = "activity/sleep";
    /// Workout activities
    pub const WORKOUT: &str = "activity/workout";
}

/// Environment variable names
pub mod env_config {
    /// OAuth client id (required)
    pub const CLIENT_ID: &str = "WHOOP_CLIENT_ID";
    /// OAuth client secret (required)
    pub const CLIENT_SECRET: &str = "WHOOP_CLIENT_SECRET";
    /// OAuth redirect URI (required)
    pub const REDIRECT_URI: &str = "WHOOP_REDIRECT_URI";
    /// Override for the API base URL
    pub const API_BASE_URL: &str = "WHOOP_API_BASE_URL";
    /// Override for the authorization endpoint
    pub const AUTH_URL: &str = "WHOOP_AUTH_URL";
    /// Override for the token endpoint
    pub const TOKEN_URL: &str = "WHOOP_TOKEN_URL";
    /// Path of the persisted token file
    pub const TOKEN_FILE: &str = "WHOOP_TOKEN_FILE";
    /// Port of the local OAuth callback server
    pub const AUTH_PORT: &str = "WHOOP_AUTH_PORT";
}

/// Defaults for optional settings
pub mod defaults {
    /// Token file written by the OAuth helper and read at server startup
    pub const TOKEN_FILE: &str = "whoop-tokens.json";
    /// OAuth callback server port
    pub const AUTH_PORT: u16 = 3000;
    /// Seconds the callback server stays up after a successful authentication
    pub const SHUTDOWN_DELAY_SECS: u64 = 5;
    /// Connect timeout for the shared HTTP client
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Length of the random OAuth `state` value
    pub const OAUTH_STATE_LENGTH: usize = 32;
}

/// MCP / JSON-RPC protocol constants
pub mod protocol {
    /// JSON-RPC version string
    pub const JSONRPC_VERSION: &str = "2.0";
    /// MCP protocol revision advertised in `initialize`
    pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
    /// Server name advertised in `initialize`
    pub const SERVER_NAME: &str = "whoop-mcp-server";
}

/// JSON-RPC error codes
pub mod errors {
    /// Invalid JSON was received
    pub const ERROR_PARSE: i32 = -32700;
    /// The JSON sent is not a valid request object
    pub const ERROR_INVALID_REQUEST: i32 = -32600;
    /// The method does not exist
    pub const ERROR_METHOD_NOT_FOUND: i32 = -32601;
    /// Invalid method parameters
    pub const ERROR_INVALID_PARAMS: i32 = -32602;
    /// Internal JSON-RPC error
    pub const ERROR_INTERNAL_ERROR: i32 = -32603;
}
