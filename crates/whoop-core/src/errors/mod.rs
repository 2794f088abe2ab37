// ABOUTME: Unified error handling system with standard error codes
// ABOUTME: Converts tool, OAuth, and remote API failures into a single AppError type
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Unified Error Handling System
//!
//! Every component reports failures through one of three domain enums:
//!
//! - [`ToolError`]: malformed or missing tool arguments, detected before any I/O
//! - [`OAuthError`]: state mismatch, provider-reported errors, failed token grants
//! - [`ApiError`]: non-2xx responses and transport failures from WHOOP endpoints
//!
//! Each converts into [`AppError`], which carries an [`ErrorCode`] and a
//! human-readable message suitable for tool envelopes and log lines.

/// Remote API error types
pub mod api;
/// OAuth flow error types
pub mod oauth;
/// Tool argument and routing error types
pub mod tool;

pub use api::ApiError;
pub use oauth::OAuthError;
pub use tool::ToolError;

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Argument has the wrong type or an unacceptable value
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Required argument is absent
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Resource Management (4000-4999)
    /// Requested tool, route, or record does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,

    // External Services (5000-5999)
    /// WHOOP answered with an error status
    #[serde(rename = "EXTERNAL_SERVICE_ERROR")]
    ExternalServiceError = 5000,
    /// WHOOP could not be reached
    #[serde(rename = "EXTERNAL_SERVICE_UNAVAILABLE")]
    ExternalServiceUnavailable = 5001,
    /// OAuth authorization or token grant failed
    #[serde(rename = "EXTERNAL_AUTH_FAILED")]
    ExternalAuthFailed = 5002,
    /// OAuth callback failed the CSRF state check
    #[serde(rename = "SECURITY_STATE_MISMATCH")]
    SecurityStateMismatch = 5003,

    // Configuration (6000-6999)
    /// Required configuration is missing
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing = 6001,
    /// Configuration is present but invalid
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    /// Token file could not be read or written
    #[serde(rename = "STORAGE_ERROR")]
    StorageError = 9002,
    /// Data serialization/deserialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::MissingRequiredField => "A required field is missing from the request",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::ExternalAuthFailed => "Authentication with external service failed",
            Self::SecurityStateMismatch => "OAuth state parameter mismatch",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
            Self::StorageError => "Storage operation failed",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Resource not found
    #[must_use]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ResourceNotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// Missing configuration
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigMissing, message)
    }

    /// Invalid configuration
    #[must_use]
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// External service error
    #[must_use]
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// Token file storage error
    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, message)
    }

    /// Serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }

    /// Internal server error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl StdError for AppError {}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl From<ToolError> for AppError {
    fn from(error: ToolError) -> Self {
        let code = match &error {
            ToolError::MissingParameter { .. } => ErrorCode::MissingRequiredField,
            ToolError::InvalidParameter { .. } => ErrorCode::InvalidInput,
            ToolError::UnknownTool { .. } => ErrorCode::ResourceNotFound,
        };
        Self::new(code, error.to_string())
    }
}

impl From<OAuthError> for AppError {
    fn from(error: OAuthError) -> Self {
        let code = if error.is_security_failure() {
            ErrorCode::SecurityStateMismatch
        } else {
            ErrorCode::ExternalAuthFailed
        };
        Self::new(code, error.to_string())
    }
}

impl From<ApiError> for AppError {
    fn from(error: ApiError) -> Self {
        let code = match &error {
            ApiError::Status { .. } => ErrorCode::ExternalServiceError,
            ApiError::Transport { .. } => ErrorCode::ExternalServiceUnavailable,
            ApiError::Decode { .. } => ErrorCode::SerializationError,
        };
        Self::new(code, error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_maps_to_validation_codes() {
        let missing: AppError = ToolError::missing_parameter("cycleId", "number").into();
        assert_eq!(missing.code, ErrorCode::MissingRequiredField);
        assert_eq!(
            missing.message,
            "cycleId is required and must be a number"
        );

        let unknown: AppError = ToolError::unknown_tool("whoop-teleport").into();
        assert_eq!(unknown.code, ErrorCode::ResourceNotFound);
        assert_eq!(unknown.message, "Unknown tool: whoop-teleport");
    }

    #[test]
    fn test_state_mismatch_is_security_code() {
        let error: AppError = OAuthError::StateMismatch.into();
        assert_eq!(error.code, ErrorCode::SecurityStateMismatch);

        let denied: AppError = OAuthError::ProviderDenied {
            error: "access_denied".to_owned(),
            description: None,
        }
        .into();
        assert_eq!(denied.code, ErrorCode::ExternalAuthFailed);
    }

    #[test]
    fn test_api_error_keeps_status_and_body() {
        let error: AppError = ApiError::Status {
            status: 404,
            body: "{\"message\":\"missing\"}".to_owned(),
        }
        .into();
        assert_eq!(error.code, ErrorCode::ExternalServiceError);
        assert!(error.message.contains("404"));
        assert!(error.message.contains("missing"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::SecurityStateMismatch).unwrap();
        assert_eq!(json, "\"SECURITY_STATE_MISMATCH\"");
    }
}
