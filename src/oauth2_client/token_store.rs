// ABOUTME: Token file persistence shared by the OAuth helper and the MCP server
// ABOUTME: Writes {accessToken, refreshToken, timestamp} after login and reads it back at startup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::fs;
use tracing::{debug, info};
use whoop_core::errors::{AppError, AppResult};
use whoop_core::models::{StoredTokens, TokenPair};

/// JSON token file on local disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Store backed by `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the token file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a token pair stamped with the current time
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be written
    pub async fn save(&self, tokens: &TokenPair) -> AppResult<StoredTokens> {
        let record = StoredTokens::from_token_pair(tokens, Utc::now());
        let json = serde_json::to_string_pretty(&record)?;
        fs::write(&self.path, json).await.map_err(|e| {
            AppError::storage(format!(
                "Failed to write token file {}: {e}",
                self.path.display()
            ))
        })?;
        info!(path = %self.path.display(), "Tokens saved");
        Ok(record)
    }

    /// Read the token file; `Ok(None)` when it does not exist
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be read, or a
    /// serialization error if it is not a token record
    pub async fn load(&self) -> AppResult<Option<StoredTokens>> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No token file found");
                return Ok(None);
            }
            Err(e) => {
                return Err(AppError::storage(format!(
                    "Failed to read token file {}: {e}",
                    self.path.display()
                )))
            }
        };

        let record: StoredTokens = serde_json::from_str(&contents).map_err(|e| {
            AppError::serialization(format!(
                "Token file {} is not valid: {e}",
                self.path.display()
            ))
        })?;
        Ok(Some(record))
    }
}
