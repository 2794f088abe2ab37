// ABOUTME: Local OAuth callback server that obtains WHOOP tokens through the browser
// ABOUTME: Serves the start page, verifies the callback, saves tokens, and shuts itself down
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # OAuth Callback Server
//!
//! `GET /` starts a fresh authorization session, answers with a page linking to
//! WHOOP and tries to open that link in the default browser. WHOOP redirects
//! back to `GET /callback`, where the [`AuthorizationFlow`] verifies the CSRF
//! state and exchanges the code. On success the token pair is stored in the
//! API client and written to the token file, and the server stops a few
//! seconds later.

/// Start, success and error pages
pub mod templates;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::{signal, task, time};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use whoop_core::constants::defaults;
use whoop_core::errors::{AppError, AppResult, OAuthError};
use whoop_core::models::TokenPair;

use crate::config::ApiConfig;
use crate::logging::redact_token;
use crate::oauth2_client::{
    AuthorizationFlow, CallbackParams, OAuth2Client, OAuth2Config, TokenStore,
};
use crate::providers::WhoopApiClient;
use templates::OAuthTemplateRenderer;

/// Redirect URIs worth registering when WHOOP rejects the configured one
pub const CANDIDATE_REDIRECT_URIS: &[&str] = &[
    "http://localhost:3000/callback",
    "http://localhost:3000",
    "http://localhost:8080/callback",
    "http://localhost:8080",
    "http://127.0.0.1:3000/callback",
    "http://127.0.0.1:3000",
    "https://localhost:3000/callback",
    "urn:ietf:wg:oauth:2.0:oob",
    "http://localhost:3000/oauth/callback",
];

/// Behaviour switches for the callback server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthServerOptions {
    /// Launch the system browser when the start page is served
    pub open_browser: bool,
    /// Delay between a successful callback and shutdown
    pub shutdown_delay: Duration,
}

impl Default for AuthServerOptions {
    fn default() -> Self {
        Self {
            open_browser: true,
            shutdown_delay: Duration::from_secs(defaults::SHUTDOWN_DELAY_SECS),
        }
    }
}

/// Shared state of the callback server
pub struct AuthServerState {
    client: Arc<WhoopApiClient>,
    flow: AuthorizationFlow,
    store: TokenStore,
    options: AuthServerOptions,
    shutdown: Notify,
}

impl AuthServerState {
    /// State whose flow exchanges codes through `client`'s OAuth client
    #[must_use]
    pub fn new(client: Arc<WhoopApiClient>, store: TokenStore, options: AuthServerOptions) -> Self {
        let flow = AuthorizationFlow::new(client.oauth().clone());
        Self::with_flow(client, flow, store, options)
    }

    /// State with an explicit authorization flow
    #[must_use]
    pub fn with_flow(
        client: Arc<WhoopApiClient>,
        flow: AuthorizationFlow,
        store: TokenStore,
        options: AuthServerOptions,
    ) -> Self {
        Self {
            client,
            flow,
            store,
            options,
            shutdown: Notify::new(),
        }
    }

    /// Authorization flow driven by the routes
    #[must_use]
    pub const fn flow(&self) -> &AuthorizationFlow {
        &self.flow
    }

    /// Resolves once a successful callback has scheduled shutdown
    pub async fn shutdown_requested(&self) {
        self.shutdown.notified().await;
    }
}

/// Build the callback server router
pub fn router(state: Arc<AuthServerState>) -> Router {
    Router::new()
        .route("/", get(handle_start))
        .route("/callback", get(handle_callback))
        .fallback(handle_not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `127.0.0.1:port` and serve until authentication completes or Ctrl-C
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails
pub async fn serve(state: Arc<AuthServerState>, port: u16) -> AppResult<()> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("WHOOP authentication server running on http://localhost:{port}");
    info!("Visit the URL above to start authentication");

    let app = router(Arc::clone(&state));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| AppError::internal(format!("Authentication server failed: {e}")))?;

    info!("Authentication server stopped");
    Ok(())
}

/// Authorization URL for every entry of [`CANDIDATE_REDIRECT_URIS`]
///
/// # Errors
///
/// Returns an error if the configured authorization endpoint is not a URL
pub fn redirect_uri_candidates(config: &ApiConfig) -> Result<Vec<(String, String)>, OAuthError> {
    let base = OAuth2Config::from_api_config(config);
    CANDIDATE_REDIRECT_URIS
        .iter()
        .map(|uri| {
            let client = OAuth2Client::new(base.clone().with_redirect_uri(*uri));
            client
                .get_authorization_url(None)
                .map(|url| ((*uri).to_owned(), url))
        })
        .collect()
}

async fn shutdown_signal(state: Arc<AuthServerState>) {
    tokio::select! {
        () = state.shutdown_requested() => info!("Authentication complete, shutting down"),
        result = signal::ctrl_c() => match result {
            Ok(()) => info!("Received Ctrl-C, shutting down authentication server"),
            Err(e) => error!("Failed to listen for Ctrl-C: {e}"),
        },
    }
}

async fn handle_start(State(state): State<Arc<AuthServerState>>) -> Response {
    let start = match state.flow.begin().await {
        Ok(start) => start,
        Err(e) => {
            error!("Failed to start authorization: {e}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(OAuthTemplateRenderer::render_error_template(&e)),
            )
                .into_response();
        }
    };

    if state.options.open_browser {
        info!("Opening WHOOP authorization page");
        let url = start.authorization_url.clone();
        task::spawn_blocking(move || {
            if let Err(e) = open::that(&url) {
                warn!("Could not open browser automatically: {e}");
                info!("Please visit this URL manually: {url}");
            }
        });
    }

    Html(OAuthTemplateRenderer::render_start_template(
        &start.authorization_url,
    ))
    .into_response()
}

async fn handle_callback(
    State(state): State<Arc<AuthServerState>>,
    Query(params): Query<CallbackParams>,
) -> Html<String> {
    let tokens = match state.flow.complete(&params).await {
        Ok(tokens) => tokens,
        Err(e) => {
            if e.is_security_failure() {
                error!(security_event = "oauth_callback_rejected", "OAuth callback rejected: {e}");
            } else {
                error!("Authentication failed: {e}");
            }
            return Html(OAuthTemplateRenderer::render_error_template(&e));
        }
    };

    info!(
        access_token = %redact_token(&tokens.access_token),
        has_refresh_token = tokens.refresh_token.is_some(),
        expires_in = tokens.expires_in,
        "Authentication successful"
    );

    match finish_login(&state, &tokens).await {
        Ok(page) => {
            schedule_shutdown(&state);
            Html(page)
        }
        Err(e) => {
            error!("Failed to save tokens: {e}");
            Html(OAuthTemplateRenderer::render_failure(
                "Authentication Failed",
                &e.message,
                None,
            ))
        }
    }
}

async fn finish_login(state: &AuthServerState, tokens: &TokenPair) -> AppResult<String> {
    state
        .client
        .set_access_token(tokens.access_token.clone())
        .await;
    state.store.save(tokens).await?;

    let profile = match state.client.get_user_profile().await {
        Ok(profile) => {
            info!(user = %profile.display_name(), "Access token verified");
            Some(profile)
        }
        Err(e) => {
            warn!("Access token test failed: {e}");
            None
        }
    };

    let token_file = state.store.path().display().to_string();
    Ok(OAuthTemplateRenderer::render_success_template(
        profile.as_ref(),
        &token_file,
    ))
}

fn schedule_shutdown(state: &Arc<AuthServerState>) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        time::sleep(state.options.shutdown_delay).await;
        state.shutdown.notify_one();
    });
}

async fn handle_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
