// ABOUTME: OAuth error types for the authorization-code flow and token grants
// ABOUTME: Distinguishes CSRF state failures from provider-reported and token endpoint errors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use thiserror::Error;

/// Failures of the OAuth authorization flow or of a token grant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OAuthError {
    /// Callback `state` does not match the session that issued the redirect
    #[error("State parameter mismatch - possible CSRF attempt")]
    StateMismatch,
    /// Callback arrived while no authorization session was in flight
    #[error("No authorization in progress - start the flow again")]
    NoActiveSession,
    /// Provider redirected back with an `error` parameter
    #[error("Authorization denied by provider: {error}{}", .description.as_ref().map(|d| format!(" ({d})")).unwrap_or_default())]
    ProviderDenied {
        /// Provider error code (e.g. `access_denied`)
        error: String,
        /// Optional `error_description` from the provider
        description: Option<String>,
    },
    /// Callback carried neither a `code` nor an `error`
    #[error("No authorization code or error received")]
    MissingCode,
    /// Token endpoint answered with a non-2xx status
    #[error("Token request failed with status {status}: {body}")]
    TokenEndpoint {
        /// HTTP status code
        status: u16,
        /// Upstream response body
        body: String,
    },
    /// Token endpoint could not be reached
    #[error("Token request failed: {message}")]
    Transport {
        /// Transport error description
        message: String,
    },
    /// Token endpoint returned a body that is not a token response
    #[error("Invalid token response: {message}")]
    InvalidResponse {
        /// Parse error description
        message: String,
    },
    /// Authorization URL could not be built from the configured endpoint
    #[error("Invalid authorization URL: {message}")]
    InvalidAuthorizationUrl {
        /// Parse error description
        message: String,
    },
}

impl OAuthError {
    /// Whether this failure indicates a possibly forged callback
    #[must_use]
    pub const fn is_security_failure(&self) -> bool {
        matches!(self, Self::StateMismatch | Self::NoActiveSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_denied_message_includes_description() {
        let error = OAuthError::ProviderDenied {
            error: "access_denied".to_owned(),
            description: Some("User cancelled".to_owned()),
        };
        assert_eq!(
            error.to_string(),
            "Authorization denied by provider: access_denied (User cancelled)"
        );

        let bare = OAuthError::ProviderDenied {
            error: "access_denied".to_owned(),
            description: None,
        };
        assert_eq!(bare.to_string(), "Authorization denied by provider: access_denied");
    }

    #[test]
    fn test_security_classification() {
        assert!(OAuthError::StateMismatch.is_security_failure());
        assert!(OAuthError::NoActiveSession.is_security_failure());
        assert!(!OAuthError::MissingCode.is_security_failure());
    }
}
