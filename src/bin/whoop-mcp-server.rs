// ABOUTME: MCP server binary exposing WHOOP data tools over stdio
// ABOUTME: Loads configuration and saved tokens, then serves JSON-RPC on stdin/stdout
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # WHOOP MCP Server Binary
//!
//! Reads the token file written by `whoop-auth` so tools work without calling
//! `whoop-set-access-token` first.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{error, info, warn};
use whoop_mcp_server::config::WhoopConfig;
use whoop_mcp_server::logging::LoggingConfig;
use whoop_mcp_server::mcp::{McpRequestProcessor, StdioTransport, ToolHandlers};
use whoop_mcp_server::oauth2_client::TokenStore;
use whoop_mcp_server::providers::WhoopApiClient;

#[derive(Parser)]
#[command(name = "whoop-mcp-server")]
#[command(about = "WHOOP MCP Server - WHOOP API v2 as Model Context Protocol tools over stdio")]
struct Args {
    /// Token file to read (overrides `WHOOP_TOKEN_FILE`)
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Check the saved access token against WHOOP before serving; exit if it is rejected
    #[arg(long)]
    verify_token: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();

    LoggingConfig::from_env()
        .with_service_name("whoop-mcp-server")
        .init()?;

    let mut config = WhoopConfig::from_env()?;
    if let Some(token_file) = args.token_file {
        config.token_file = token_file;
    }

    let client = Arc::new(WhoopApiClient::new(config.api.clone()));
    let store = TokenStore::new(&config.token_file);

    match store.load().await {
        Ok(Some(tokens)) => {
            info!(
                saved_at = %tokens.timestamp,
                "Loaded saved tokens from {}",
                store.path().display()
            );
            client.set_access_token(tokens.access_token).await;
        }
        Ok(None) => {
            warn!(
                "No saved tokens at {}; run whoop-auth or call whoop-set-access-token",
                store.path().display()
            );
        }
        Err(e) => warn!("Ignoring unreadable token file: {e}"),
    }

    if args.verify_token {
        verify_access_token(&client).await?;
    }

    let processor = McpRequestProcessor::new(ToolHandlers::new(client));
    StdioTransport::new(processor).run().await?;
    Ok(())
}

async fn verify_access_token(client: &WhoopApiClient) -> Result<()> {
    if client.access_token().await.is_none() {
        bail!("No access token to verify; run whoop-auth first");
    }
    match client.get_user_profile().await {
        Ok(profile) => {
            info!(user = %profile.display_name(), "Access token is valid");
            Ok(())
        }
        Err(e) => {
            error!("Access token is invalid or expired: {e}");
            bail!("Please re-authenticate by running whoop-auth")
        }
    }
}
