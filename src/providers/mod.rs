// ABOUTME: WHOOP data provider integration
// ABOUTME: Exposes the authenticated WHOOP API client used by tools and the OAuth helper
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Authenticated WHOOP API v2 client
pub mod whoop_provider;

pub use whoop_provider::{Credentials, ResourceRequest, WhoopApiClient};
