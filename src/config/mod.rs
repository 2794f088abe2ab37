// ABOUTME: Configuration management module for credentials, endpoints, and server settings
// ABOUTME: Environment-only configuration with optional .env loading in the binaries
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration module
//!
//! All settings come from environment variables. The binaries load a `.env`
//! file first when one exists.

/// Environment and server configuration
pub mod environment;

pub use environment::{ApiConfig, WhoopConfig, WhoopEndpoints};
