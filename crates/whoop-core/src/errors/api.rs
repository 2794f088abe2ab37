// ABOUTME: Remote API error types for authenticated WHOOP endpoint calls
// ABOUTME: Carries HTTP status and body so callers can see exactly what WHOOP returned
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use thiserror::Error;

/// Failure of an authenticated WHOOP API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// WHOOP answered with a non-2xx status
    #[error("WHOOP API request failed with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body as returned by WHOOP
        body: String,
    },
    /// Request never produced a response
    #[error("Failed to send request to WHOOP: {message}")]
    Transport {
        /// Transport error description
        message: String,
    },
    /// Response body did not match the expected resource shape
    #[error("Failed to parse WHOOP response: {message}")]
    Decode {
        /// Parse error description
        message: String,
    },
}

impl ApiError {
    /// HTTP status of the failed call, if WHOOP answered at all
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }

    /// Whether the failure means the access token is missing, stale, or revoked
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }
}
