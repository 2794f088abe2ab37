// ABOUTME: Single-session OAuth authorization flow with CSRF state verification
// ABOUTME: Idle -> AwaitingCallback -> Authenticated | Failed, each session consumed by one callback
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::mem;
use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};
use whoop_core::constants::defaults;
use whoop_core::errors::OAuthError;
use whoop_core::models::TokenPair;

use super::{OAuth2Client, TokenExchanger};

/// Query parameters WHOOP appends to the redirect URI
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackParams {
    /// Authorization code on success
    pub code: Option<String>,
    /// Echo of the `state` sent with the authorization URL
    pub state: Option<String>,
    /// Error code when the user or provider refused
    pub error: Option<String>,
    /// Human readable detail for `error`
    pub error_description: Option<String>,
}

/// Where the authorization flow currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    /// No authorization started
    Idle,
    /// Authorization URL handed out; waiting for the redirect
    AwaitingCallback {
        /// Expected callback `state`
        state: String,
    },
    /// Tokens obtained
    Authenticated,
    /// The last attempt failed
    Failed {
        /// Failure message shown to the user
        reason: String,
    },
}

/// A freshly started authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationStart {
    /// URL to send the user to
    pub authorization_url: String,
    /// CSRF value embedded in the URL
    pub state: String,
}

/// Drives one authorization at a time.
///
/// `begin` always discards the previous session. A callback is checked against
/// the session that is in flight when it arrives; once checked the session is
/// gone, so replaying a callback fails with [`OAuthError::NoActiveSession`].
pub struct AuthorizationFlow {
    oauth: OAuth2Client,
    exchanger: Arc<dyn TokenExchanger>,
    state: Mutex<FlowState>,
}

impl AuthorizationFlow {
    /// Flow that exchanges codes through the same client that builds the URLs
    #[must_use]
    pub fn new(oauth: OAuth2Client) -> Self {
        let exchanger: Arc<dyn TokenExchanger> = Arc::new(oauth.clone());
        Self::with_exchanger(oauth, exchanger)
    }

    /// Flow with a separate token exchanger
    #[must_use]
    pub fn with_exchanger(oauth: OAuth2Client, exchanger: Arc<dyn TokenExchanger>) -> Self {
        Self {
            oauth,
            exchanger,
            state: Mutex::new(FlowState::Idle),
        }
    }

    /// Current state snapshot
    pub async fn state(&self) -> FlowState {
        self.state.lock().await.clone()
    }

    /// Start a new authorization, replacing any session in flight
    ///
    /// # Errors
    ///
    /// Returns an error if the authorization URL cannot be built; the flow is
    /// then left unchanged
    pub async fn begin(&self) -> Result<AuthorizationStart, OAuthError> {
        let state = generate_state();
        let authorization_url = self.oauth.get_authorization_url(Some(&state))?;

        let mut current = self.state.lock().await;
        if matches!(*current, FlowState::AwaitingCallback { .. }) {
            info!("Discarding previous authorization session");
        }
        *current = FlowState::AwaitingCallback {
            state: state.clone(),
        };
        drop(current);

        info!("Authorization session started");
        Ok(AuthorizationStart {
            authorization_url,
            state,
        })
    }

    /// Handle the redirect back from WHOOP.
    ///
    /// Checks run in order: session present, `state` equal, no `error`, `code`
    /// present. Only then is the code exchanged. The session is taken out of
    /// the flow before the exchange and the lock is not held across it, so a
    /// slow token endpoint never blocks [`begin`](Self::begin).
    ///
    /// # Errors
    ///
    /// Returns the failing check or the token exchange error; the flow moves to
    /// `Failed` in every error case except a callback with no session in flight
    pub async fn complete(&self, params: &CallbackParams) -> Result<TokenPair, OAuthError> {
        let expected = self.take_session().await?;
        let result = self.check_and_exchange(&expected, params).await;

        let mut current = self.state.lock().await;
        if *current == FlowState::Idle {
            *current = match &result {
                Ok(_) => FlowState::Authenticated,
                Err(e) => FlowState::Failed {
                    reason: e.to_string(),
                },
            };
        } else {
            info!("A new authorization started during the token exchange; keeping it");
        }
        drop(current);
        result
    }

    async fn take_session(&self) -> Result<String, OAuthError> {
        let mut current = self.state.lock().await;
        match mem::replace(&mut *current, FlowState::Idle) {
            FlowState::AwaitingCallback { state } => Ok(state),
            other => {
                *current = other;
                warn!(
                    security_event = "oauth_callback_without_session",
                    "OAuth callback received with no authorization in progress"
                );
                Err(OAuthError::NoActiveSession)
            }
        }
    }

    async fn check_and_exchange(
        &self,
        expected: &str,
        params: &CallbackParams,
    ) -> Result<TokenPair, OAuthError> {
        if params.state.as_deref() != Some(expected) {
            warn!(
                security_event = "oauth_state_mismatch",
                "OAuth state parameter mismatch - possible CSRF attempt"
            );
            return Err(OAuthError::StateMismatch);
        }

        if let Some(error) = &params.error {
            warn!(error = %error, "Authorization denied by WHOOP");
            return Err(OAuthError::ProviderDenied {
                error: error.clone(),
                description: params.error_description.clone(),
            });
        }

        let Some(code) = params.code.as_deref() else {
            return Err(OAuthError::MissingCode);
        };

        self.exchanger.exchange_code(code).await
    }
}

fn generate_state() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(defaults::OAUTH_STATE_LENGTH)
        .map(char::from)
        .collect()
}
