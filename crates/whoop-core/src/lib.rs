// ABOUTME: Core types and constants for the WHOOP MCP server
// ABOUTME: Foundation crate with error handling, pagination, resource models, and constants
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # WHOOP Core
//!
//! Foundation crate shared by the MCP server and the OAuth helper. It holds
//! everything that does not touch the network:
//!
//! - **errors**: `AppError`, `ErrorCode`, and the tool / OAuth / remote API error enums
//! - **constants**: WHOOP endpoints, OAuth scopes, tool names, protocol codes
//! - **pagination**: collection query parameters passed through to WHOOP
//! - **models**: WHOOP resources, token pairs, and the persisted token record

/// Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Cursor passthrough pagination for WHOOP collection endpoints
pub mod pagination;

/// WHOOP resource models and OAuth token types
pub mod models;
