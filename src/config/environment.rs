// ABOUTME: Environment configuration for WHOOP credentials, endpoints, and local server settings
// ABOUTME: Validates required variables up front and reports every missing one at once
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration

use std::env;
use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info};
use url::Url;
use whoop_core::constants::{defaults, env_config, whoop};
use whoop_core::errors::{AppError, AppResult};

/// WHOOP endpoints; production values unless overridden
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoopEndpoints {
    /// Base URL of the v2 developer API
    pub api_base_url: String,
    /// OAuth2 authorization endpoint
    pub auth_url: String,
    /// OAuth2 token endpoint
    pub token_url: String,
}

impl Default for WhoopEndpoints {
    fn default() -> Self {
        Self {
            api_base_url: whoop::API_BASE_URL.to_owned(),
            auth_url: whoop::AUTH_URL.to_owned(),
            token_url: whoop::TOKEN_URL.to_owned(),
        }
    }
}

impl WhoopEndpoints {
    /// Point every endpoint at one server, as a mock WHOOP would be laid out
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api_base_url: format!("{base}/developer/v2"),
            auth_url: format!("{base}/oauth/oauth2/auth"),
            token_url: format!("{base}/oauth/oauth2/token"),
        }
    }
}

/// OAuth application registration plus the endpoints it talks to
#[derive(Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// OAuth client id
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI registered with WHOOP
    pub redirect_uri: String,
    /// WHOOP endpoints
    pub endpoints: WhoopEndpoints,
}

impl ApiConfig {
    /// Credentials against the production endpoints
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            endpoints: WhoopEndpoints::default(),
        }
    }

    /// Replace the endpoints
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: WhoopEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_uri", &self.redirect_uri)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

/// Complete runtime configuration shared by both binaries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhoopConfig {
    /// OAuth application and endpoints
    pub api: ApiConfig,
    /// Where the OAuth helper writes tokens and the MCP server reads them
    pub token_file: PathBuf,
    /// Port of the local OAuth callback server
    pub auth_port: u16,
}

impl WhoopConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns a `ConfigMissing` error naming every absent required variable, or
    /// `ConfigInvalid` if an endpoint override or the port cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            client_id = %config.api.client_id,
            redirect_uri = %config.api.redirect_uri,
            token_file = %config.token_file.display(),
            "WHOOP configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`WhoopConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let client_id = read(env_config::CLIENT_ID);
        let client_secret = read(env_config::CLIENT_SECRET);
        let redirect_uri = read(env_config::REDIRECT_URI);

        let (Some(client_id), Some(client_secret), Some(redirect_uri)) =
            (client_id.clone(), client_secret.clone(), redirect_uri.clone())
        else {
            let missing: Vec<&str> = [
                (env_config::CLIENT_ID, client_id.is_none()),
                (env_config::CLIENT_SECRET, client_secret.is_none()),
                (env_config::REDIRECT_URI, redirect_uri.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            return Err(AppError::config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        };

        let defaults_endpoints = WhoopEndpoints::default();
        let endpoints = WhoopEndpoints {
            api_base_url: endpoint_override(
                read(env_config::API_BASE_URL),
                env_config::API_BASE_URL,
                defaults_endpoints.api_base_url,
            )?,
            auth_url: endpoint_override(
                read(env_config::AUTH_URL),
                env_config::AUTH_URL,
                defaults_endpoints.auth_url,
            )?,
            token_url: endpoint_override(
                read(env_config::TOKEN_URL),
                env_config::TOKEN_URL,
                defaults_endpoints.token_url,
            )?,
        };

        let token_file = read(env_config::TOKEN_FILE)
            .map_or_else(|| PathBuf::from(defaults::TOKEN_FILE), PathBuf::from);

        let auth_port = match read(env_config::AUTH_PORT) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                AppError::config_invalid(format!(
                    "{} must be a port number, got '{raw}': {e}",
                    env_config::AUTH_PORT
                ))
            })?,
            None => defaults::AUTH_PORT,
        };

        debug!(api_base_url = %endpoints.api_base_url, auth_port, "Resolved WHOOP settings");

        Ok(Self {
            api: ApiConfig::new(client_id, client_secret, redirect_uri).with_endpoints(endpoints),
            token_file,
            auth_port,
        })
    }
}

fn endpoint_override(value: Option<String>, name: &str, default: String) -> AppResult<String> {
    let Some(value) = value else {
        return Ok(default);
    };
    Url::parse(&value)
        .map_err(|e| AppError::config_invalid(format!("{name} is not a valid URL: {e}")))?;
    Ok(value.trim_end_matches('/').to_owned())
}
