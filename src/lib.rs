// ABOUTME: Main library entry point for the WHOOP MCP server
// ABOUTME: Exposes the WHOOP API client, MCP tool surface, and OAuth helper server
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # WHOOP MCP Server
//!
//! A Model Context Protocol (MCP) server exposing the WHOOP API v2 as tools,
//! plus a small local web server that walks a user through WHOOP's OAuth 2.0
//! authorization-code flow.
//!
//! ## Quick Start
//!
//! 1. Set `WHOOP_CLIENT_ID`, `WHOOP_CLIENT_SECRET` and `WHOOP_REDIRECT_URI`
//!    (a `.env` file works)
//! 2. Run `whoop-auth` and approve access in the browser; tokens land in
//!    `whoop-tokens.json`
//! 3. Point an MCP client at `whoop-mcp-server`
//!
//! ## Architecture
//!
//! - **providers**: authenticated WHOOP REST client, one method per resource
//! - **mcp**: JSON-RPC over stdio, tool schemas, and typed tool dispatch
//! - **`oauth2_client`**: authorization URLs, token grants, the callback flow,
//!   token persistence
//! - **`auth_server`**: axum routes for the local callback listener
//! - **config** / **logging**: environment-driven settings and tracing setup
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use whoop_mcp_server::config::WhoopConfig;
//! use whoop_mcp_server::errors::AppResult;
//! use whoop_mcp_server::providers::WhoopApiClient;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = WhoopConfig::from_env()?;
//!     let client = Arc::new(WhoopApiClient::new(config.api));
//!     client.set_access_token("token-from-whoop-auth").await;
//!
//!     let profile = client.get_user_profile().await?;
//!     println!("Hello {}", profile.display_name());
//!     Ok(())
//! }
//! ```

/// Local OAuth callback server
pub mod auth_server;

/// Environment configuration
pub mod config;

/// Tracing subscriber setup
pub mod logging;

/// MCP protocol and tool dispatch
pub mod mcp;

/// OAuth 2.0 client of WHOOP
pub mod oauth2_client;

/// WHOOP API client
pub mod providers;

/// Shared HTTP utilities
pub mod utils;

pub use whoop_core::{constants, errors, models, pagination};
