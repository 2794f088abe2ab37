// ABOUTME: OAuth 2.0 client implementation for connecting to WHOOP
// ABOUTME: Authorization URLs, token grants, the single-session callback flow, and token persistence
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # OAuth 2.0 Client Module
//!
//! This server acts as an OAuth 2.0 client of WHOOP. This module handles:
//! - Authorization URL construction with the fixed WHOOP scope set
//! - Authorization-code and refresh-token grants
//! - The local callback flow with CSRF `state` verification
//! - Reading and writing the token file

use async_trait::async_trait;
use whoop_core::errors::OAuthError;
use whoop_core::models::TokenPair;

/// Core OAuth 2.0 client implementation
pub mod client;
/// OAuth authorization flow management
pub mod flow_manager;
/// Token file persistence
pub mod token_store;

pub use client::{OAuth2Client, OAuth2Config};
pub use flow_manager::{AuthorizationFlow, AuthorizationStart, CallbackParams, FlowState};
pub use token_store::TokenStore;

/// Performs the two token grants against the provider token endpoint
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Authorization-code grant
    async fn exchange_code(&self, code: &str) -> Result<TokenPair, OAuthError>;

    /// Refresh-token grant
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, OAuthError>;
}
