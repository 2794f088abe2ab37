// ABOUTME: Tool execution handlers routing typed tool calls to the WHOOP API client
// ABOUTME: Serializes results and failures into the uniform MCP tool response envelope
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use tracing::field::Empty;
use tracing::{info, warn, Span};
use whoop_core::errors::{AppError, AppResult};

use super::schema::ToolResponse;
use super::tools::WhoopTool;
use crate::providers::{ResourceRequest, WhoopApiClient};

/// Confirmation returned by `whoop-revoke-user-access`
pub const REVOKE_CONFIRMATION: &str = "User access revoked successfully";
/// Confirmation returned by `whoop-set-access-token`
pub const SET_TOKEN_CONFIRMATION: &str = "Access token set successfully";
/// Appended to a WHOOP 401 so the caller knows how to recover
pub const REAUTHENTICATE_HINT: &str =
    " (the access token was rejected; run whoop-auth or call whoop-set-access-token)";

/// Tool execution handlers for MCP protocol
#[derive(Clone)]
pub struct ToolHandlers {
    client: Arc<WhoopApiClient>,
}

impl ToolHandlers {
    /// Handlers backed by `client`
    #[must_use]
    pub const fn new(client: Arc<WhoopApiClient>) -> Self {
        Self { client }
    }

    /// Client every tool call goes through
    #[must_use]
    pub const fn client(&self) -> &Arc<WhoopApiClient> {
        &self.client
    }

    /// Run one tool call. Never fails: errors come back as `isError` envelopes.
    #[tracing::instrument(
        skip(self, arguments),
        fields(tool_name = %name, success = Empty, duration_ms = Empty)
    )]
    pub async fn handle_tool_call(&self, name: &str, arguments: Option<&Value>) -> ToolResponse {
        let started = Instant::now();
        let outcome = match WhoopTool::parse(name, arguments) {
            Ok(tool) => self.execute(tool).await,
            Err(e) => Err(AppError::from(e)),
        };
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        Span::current()
            .record("success", outcome.is_ok())
            .record("duration_ms", elapsed);

        match outcome {
            Ok(text) => {
                info!("Tool {name} completed in {elapsed}ms");
                ToolResponse::text(text)
            }
            Err(e) => {
                warn!(error_code = ?e.code, "Tool {name} failed: {}", e.message);
                ToolResponse::error(&e.message)
            }
        }
    }

    /// Execute a validated tool call and render its text payload
    ///
    /// # Errors
    ///
    /// Returns the WHOOP API or OAuth failure converted to [`AppError`]
    pub async fn execute(&self, tool: WhoopTool) -> AppResult<String> {
        let client = &self.client;
        match tool {
            WhoopTool::GetUserProfile => self.fetch(ResourceRequest::UserProfile).await,
            WhoopTool::GetUserBodyMeasurements => {
                self.fetch(ResourceRequest::BodyMeasurements).await
            }
            WhoopTool::RevokeUserAccess => {
                client.revoke_user_access().await?;
                Ok(REVOKE_CONFIRMATION.to_owned())
            }
            WhoopTool::GetCycleById { cycle_id } => {
                self.fetch(ResourceRequest::Cycle(cycle_id)).await
            }
            WhoopTool::GetCycleCollection(params) => {
                self.fetch(ResourceRequest::Cycles(&params)).await
            }
            WhoopTool::GetSleepForCycle { cycle_id } => {
                self.fetch(ResourceRequest::SleepForCycle(cycle_id)).await
            }
            WhoopTool::GetRecoveryCollection(params) => {
                self.fetch(ResourceRequest::Recoveries(&params)).await
            }
            WhoopTool::GetRecoveryForCycle { cycle_id } => {
                self.fetch(ResourceRequest::RecoveryForCycle(cycle_id)).await
            }
            WhoopTool::GetSleepById { sleep_id } => {
                self.fetch(ResourceRequest::Sleep(&sleep_id)).await
            }
            WhoopTool::GetSleepCollection(params) => {
                self.fetch(ResourceRequest::Sleeps(&params)).await
            }
            WhoopTool::GetWorkoutById { workout_id } => {
                self.fetch(ResourceRequest::Workout(&workout_id)).await
            }
            WhoopTool::GetWorkoutCollection(params) => {
                self.fetch(ResourceRequest::Workouts(&params)).await
            }
            WhoopTool::GetAuthorizationUrl => {
                let url = client.get_authorization_url(None)?;
                Ok(format!("Authorization URL: {url}"))
            }
            WhoopTool::ExchangeCodeForToken { code } => {
                pretty(&client.exchange_code_for_token(&code).await?)
            }
            WhoopTool::RefreshToken { refresh_token } => {
                pretty(&client.refresh_token(&refresh_token).await?)
            }
            WhoopTool::SetAccessToken { access_token } => {
                client.set_access_token(access_token).await;
                Ok(SET_TOKEN_CONFIRMATION.to_owned())
            }
        }
    }

    async fn fetch(&self, resource: ResourceRequest<'_>) -> AppResult<String> {
        let raw = self.client.get_raw(resource).await.map_err(|e| {
            let unauthorized = e.is_unauthorized();
            let mut error = AppError::from(e);
            if unauthorized {
                error.message.push_str(REAUTHENTICATE_HINT);
            }
            error
        })?;
        pretty(&raw)
    }
}

fn pretty<T: Serialize>(value: &T) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
