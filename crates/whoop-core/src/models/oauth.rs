// ABOUTME: OAuth token types returned by the token endpoint and persisted to disk
// ABOUTME: TokenPair keeps WHOOP's wire names; StoredTokens is the camelCase token file record
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens issued by an authorization-code or refresh-token grant.
///
/// `refresh_token` is only issued when the `offline` scope was granted.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token for the refresh grant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Lifetime of the access token in seconds
    pub expires_in: i64,
    /// Usually `bearer`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    /// Granted scopes (space-separated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Token file written after a successful authorization and read at server startup
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTokens {
    /// Bearer token for API calls
    pub access_token: String,
    /// Token for the refresh grant, `null` when none was issued
    pub refresh_token: Option<String>,
    /// When the tokens were written
    pub timestamp: DateTime<Utc>,
}

impl StoredTokens {
    /// Record a freshly issued token pair
    #[must_use]
    pub fn from_token_pair(tokens: &TokenPair, timestamp: DateTime<Utc>) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            timestamp,
        }
    }
}

impl fmt::Debug for StoredTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredTokens")
            .field("access_token", &"[REDACTED]")
            .field("timestamp", &self.timestamp)
            .finish_non_exhaustive()
    }
}
