// ABOUTME: Shared HTTP client with connection pooling and a connect timeout
// ABOUTME: One pooled reqwest client reused by the WHOOP API client and the token exchanger
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use reqwest::{Client, ClientBuilder};
use std::sync::OnceLock;
use std::time::Duration;
use whoop_core::constants::defaults;

/// Global shared HTTP client with default configuration
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

/// Get or create the shared HTTP client.
///
/// Only the connect phase is bounded; a request that is connected waits for
/// WHOOP as long as it takes.
pub fn shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        build_client(ClientBuilder::new()).unwrap_or_else(|_| Client::new())
    })
}

/// Create a new HTTP client with the shared defaults applied on top of `builder`
///
/// # Errors
///
/// Returns the builder error if the TLS backend cannot be initialised
pub fn build_client(builder: ClientBuilder) -> reqwest::Result<Client> {
    builder
        .connect_timeout(Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS))
        .user_agent(concat!("whoop-mcp-server/", env!("CARGO_PKG_VERSION")))
        .build()
}
