// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains the shared HTTP client used for WHOOP API and token requests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// HTTP client configuration and helpers
pub mod http_client;
