// ABOUTME: OAuth helper binary that obtains WHOOP tokens through a local callback server
// ABOUTME: Serves the authorization flow or prints authorization URLs for candidate redirect URIs
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use whoop_mcp_server::auth_server::{self, AuthServerOptions, AuthServerState};
use whoop_mcp_server::config::WhoopConfig;
use whoop_mcp_server::logging::LoggingConfig;
use whoop_mcp_server::oauth2_client::TokenStore;
use whoop_mcp_server::providers::WhoopApiClient;

#[derive(Parser)]
#[command(name = "whoop-auth")]
#[command(about = "Authenticate with WHOOP and save tokens for the MCP server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the local callback server (default)
    Serve {
        /// Callback port (overrides `WHOOP_AUTH_PORT`)
        #[arg(long)]
        port: Option<u16>,

        /// Do not launch the browser automatically
        #[arg(long)]
        no_browser: bool,
    },
    /// Print the authorization URL for each commonly registered redirect URI
    RedirectUris,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();

    LoggingConfig::from_env()
        .with_service_name("whoop-auth")
        .init()?;

    let config = WhoopConfig::from_env()?;

    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        no_browser: false,
    }) {
        Commands::Serve { port, no_browser } => {
            let client = Arc::new(WhoopApiClient::new(config.api));
            let options = AuthServerOptions {
                open_browser: !no_browser,
                ..AuthServerOptions::default()
            };
            let state = Arc::new(AuthServerState::new(
                client,
                TokenStore::new(config.token_file),
                options,
            ));
            auth_server::serve(state, port.unwrap_or(config.auth_port)).await?;
        }
        Commands::RedirectUris => {
            let candidates = auth_server::redirect_uri_candidates(&config.api)?;
            println!("Authorization URLs per redirect URI:\n");
            for (index, (redirect_uri, url)) in candidates.iter().enumerate() {
                println!("{}. Redirect URI: {redirect_uri}", index + 1);
                println!("   Auth URL: {url}\n");
            }
            println!("Open each URL and keep the redirect URI that WHOOP does not reject");
            println!("with invalid_request, then set it as WHOOP_REDIRECT_URI.");
        }
    }

    Ok(())
}
