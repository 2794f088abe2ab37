// ABOUTME: OAuth2 client for WHOOP authorization URLs and token grants
// ABOUTME: Builds the consent URL and performs the authorization-code and refresh-token grants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};
use url::Url;
use whoop_core::constants::whoop;
use whoop_core::errors::OAuthError;
use whoop_core::models::TokenPair;

use super::TokenExchanger;
use crate::config::ApiConfig;
use crate::utils::http_client::shared_client;

/// OAuth 2.0 client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct OAuth2Config {
    /// OAuth client ID from WHOOP
    pub client_id: String,
    /// OAuth client secret from WHOOP
    pub client_secret: String,
    /// Authorization endpoint URL
    pub auth_url: String,
    /// Token endpoint URL
    pub token_url: String,
    /// Redirect URI for OAuth callbacks
    pub redirect_uri: String,
    /// OAuth scopes to request
    pub scopes: Vec<String>,
}

impl OAuth2Config {
    /// Derive the OAuth settings from the API configuration with the default scopes
    #[must_use]
    pub fn from_api_config(config: &ApiConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            auth_url: config.endpoints.auth_url.clone(),
            token_url: config.endpoints.token_url.clone(),
            redirect_uri: config.redirect_uri.clone(),
            scopes: whoop::DEFAULT_SCOPES
                .split(' ')
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Same settings with a different redirect URI
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }
}

/// OAuth 2.0 client for WHOOP
#[derive(Clone)]
pub struct OAuth2Client {
    config: OAuth2Config,
    client: Client,
}

impl OAuth2Client {
    /// Create a new `OAuth2` client using the shared HTTP client
    #[must_use]
    pub fn new(config: OAuth2Config) -> Self {
        Self::with_http_client(config, shared_client().clone())
    }

    /// Create a client with an explicit HTTP client
    #[must_use]
    pub const fn with_http_client(config: OAuth2Config, client: Client) -> Self {
        Self { config, client }
    }

    /// Get the `OAuth2` configuration
    #[must_use]
    pub const fn config(&self) -> &OAuth2Config {
        &self.config
    }

    /// Get authorization URL, with `state` appended when given
    ///
    /// # Errors
    ///
    /// Returns an error if the configured authorization endpoint is not a URL
    pub fn get_authorization_url(&self, state: Option<&str>) -> Result<String, OAuthError> {
        let mut url = Url::parse(&self.config.auth_url).map_err(|e| {
            OAuthError::InvalidAuthorizationUrl {
                message: format!("{}: {e}", self.config.auth_url),
            }
        })?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("client_id", &self.config.client_id)
                .append_pair("redirect_uri", &self.config.redirect_uri)
                .append_pair("response_type", "code")
                .append_pair("scope", &self.config.scopes.join(" "));
            if let Some(state) = state {
                query.append_pair("state", state);
            }
        }

        Ok(url.to_string())
    }

    async fn request_token(
        &self,
        params: &[(&str, &str)],
        grant_type: &'static str,
    ) -> Result<TokenPair, OAuthError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .form(params)
            .send()
            .await
            .map_err(|e| OAuthError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(%status, grant_type, "Token endpoint responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body_length = body.len(),
                grant_type,
                "WHOOP token request rejected"
            );
            return Err(OAuthError::TokenEndpoint {
                status: status.as_u16(),
                body,
            });
        }

        let tokens: TokenPair = response
            .json()
            .await
            .map_err(|e| OAuthError::InvalidResponse {
                message: e.to_string(),
            })?;

        info!(
            grant_type,
            expires_in = tokens.expires_in,
            has_refresh_token = tokens.refresh_token.is_some(),
            "WHOOP token grant succeeded"
        );
        Ok(tokens)
    }
}

#[async_trait]
impl TokenExchanger for OAuth2Client {
    #[instrument(skip_all, fields(provider = "whoop", grant_type = "authorization_code"))]
    async fn exchange_code(&self, code: &str) -> Result<TokenPair, OAuthError> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.config.redirect_uri.as_str()),
        ];
        self.request_token(&params, "authorization_code").await
    }

    #[instrument(skip_all, fields(provider = "whoop", grant_type = "refresh_token"))]
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, OAuthError> {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        self.request_token(&params, "refresh_token").await
    }
}
