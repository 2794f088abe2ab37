// ABOUTME: Integration tests for WHOOP token grants and the local OAuth callback server
// ABOUTME: Exercises the axum router in-process with a wiremock token endpoint
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::time;
use tower::ServiceExt;
use whoop_mcp_server::auth_server::{router, AuthServerOptions, AuthServerState};
use whoop_mcp_server::errors::OAuthError;
use whoop_mcp_server::oauth2_client::{FlowState, TokenStore};
use whoop_mcp_server::providers::WhoopApiClient;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct CallbackHarness {
    app: Router,
    state: Arc<AuthServerState>,
    client: Arc<WhoopApiClient>,
    token_path: PathBuf,
    _dir: TempDir,
}

fn harness(server: &MockServer) -> CallbackHarness {
    let client = common::client_for(server);
    let dir = TempDir::new().unwrap();
    let token_path = dir.path().join("whoop-tokens.json");
    let options = AuthServerOptions {
        open_browser: false,
        shutdown_delay: Duration::from_millis(10),
    };
    let state = Arc::new(AuthServerState::new(
        Arc::clone(&client),
        TokenStore::new(&token_path),
        options,
    ));
    CallbackHarness {
        app: router(Arc::clone(&state)),
        state,
        client,
        token_path,
        _dir: dir,
    }
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn pending_state(state: &AuthServerState) -> String {
    match state.flow().state().await {
        FlowState::AwaitingCallback { state } => state,
        other => panic!("expected a session in flight, got {other:?}"),
    }
}

#[tokio::test]
async fn test_exchange_code_posts_form() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);

    Mock::given(method("POST"))
        .and(path("/oauth/oauth2/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_id=test-client-id"))
        .and(body_string_contains("client_secret=test-client-secret"))
        .and(body_string_contains("code=the-code"))
        .and(body_string_contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fcallback",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_token_response()))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = client.exchange_code_for_token("the-code").await.unwrap();
    assert_eq!(tokens.access_token, "fresh-access-token");
    assert_eq!(tokens.refresh_token.as_deref(), Some("fresh-refresh-token"));
    assert_eq!(tokens.expires_in, 3600);
}

#[tokio::test]
async fn test_refresh_token_grant() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);

    Mock::given(method("POST"))
        .and(path("/oauth/oauth2/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "rotated",
            "expires_in": 3600
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = client.refresh_token("old-refresh").await.unwrap();
    assert_eq!(tokens.access_token, "rotated");
    assert!(tokens.refresh_token.is_none());
}

#[tokio::test]
async fn test_token_endpoint_rejection_keeps_status_and_body() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);

    Mock::given(method("POST"))
        .and(path("/oauth/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.exchange_code_for_token("stale").await.unwrap_err();
    match err {
        OAuthError::TokenEndpoint { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("invalid_grant"));
        }
        other => panic!("expected token endpoint error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_start_page_links_to_whoop_with_state() {
    let server = MockServer::start().await;
    let h = harness(&server);

    let (status, body) = get(&h.app, "/").await;
    assert_eq!(status, StatusCode::OK);

    let state = pending_state(&h.state).await;
    assert!(body.contains(&format!("{}/oauth/oauth2/auth?", server.uri())));
    assert!(body.contains(&format!("state={state}")));
}

#[tokio::test]
async fn test_callback_with_wrong_state_is_rejected() {
    let server = MockServer::start().await;
    let h = harness(&server);

    Mock::given(method("POST"))
        .and(path("/oauth/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_token_response()))
        .expect(0)
        .mount(&server)
        .await;

    get(&h.app, "/").await;
    let (status, body) = get(&h.app, "/callback?code=abc&state=forged").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Security Error"));
    assert!(!h.token_path.exists());
    assert!(h.client.access_token().await.is_none());
    assert!(matches!(h.state.flow().state().await, FlowState::Failed { .. }));
}

#[tokio::test]
async fn test_successful_callback_saves_tokens_and_greets_user() {
    let server = MockServer::start().await;
    let h = harness(&server);

    Mock::given(method("POST"))
        .and(path("/oauth/oauth2/token"))
        .and(body_string_contains("code=good-code"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_token_response()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/developer/v2/user/profile/basic"))
        .and(header("authorization", "Bearer fresh-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_profile()))
        .expect(1)
        .mount(&server)
        .await;

    get(&h.app, "/").await;
    let state = pending_state(&h.state).await;

    let (status, body) = get(&h.app, &format!("/callback?code=good-code&state={state}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Welcome, John Smith!"));
    assert!(!body.contains("fresh-access-token"));

    assert_eq!(
        h.client.access_token().await.as_deref(),
        Some("fresh-access-token")
    );
    assert_eq!(h.state.flow().state().await, FlowState::Authenticated);

    let saved: Value =
        serde_json::from_str(&fs::read_to_string(&h.token_path).unwrap()).unwrap();
    assert_eq!(saved["accessToken"], "fresh-access-token");
    assert_eq!(saved["refreshToken"], "fresh-refresh-token");
    assert!(saved["timestamp"].is_string());

    time::timeout(Duration::from_secs(2), h.state.shutdown_requested())
        .await
        .expect("shutdown should be requested after success");
}

#[tokio::test]
async fn test_profile_failure_still_saves_tokens() {
    let server = MockServer::start().await;
    let h = harness(&server);

    Mock::given(method("POST"))
        .and(path("/oauth/oauth2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_token_response()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/developer/v2/user/profile/basic"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    get(&h.app, "/").await;
    let state = pending_state(&h.state).await;
    let (_, body) = get(&h.app, &format!("/callback?code=c&state={state}")).await;

    assert!(body.contains("You are connected to WHOOP."));
    let stored = TokenStore::new(&h.token_path).load().await.unwrap().unwrap();
    assert_eq!(stored.access_token, "fresh-access-token");
}

#[tokio::test]
async fn test_provider_denial_is_shown_escaped() {
    let server = MockServer::start().await;
    let h = harness(&server);

    get(&h.app, "/").await;
    let state = pending_state(&h.state).await;
    let (_, body) = get(
        &h.app,
        &format!("/callback?state={state}&error=access_denied&error_description=%3Cb%3Enope%3C%2Fb%3E"),
    )
    .await;

    assert!(body.contains("OAuth Error"));
    assert!(body.contains("access_denied"));
    assert!(body.contains("&lt;b&gt;nope&lt;/b&gt;"));
    assert!(!body.contains("<b>nope</b>"));
}

#[tokio::test]
async fn test_callback_without_session_is_rejected() {
    let server = MockServer::start().await;
    let h = harness(&server);

    let (status, body) = get(&h.app, "/callback?code=abc&state=anything").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Security Error"));
    assert_eq!(h.state.flow().state().await, FlowState::Idle);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let server = MockServer::start().await;
    let h = harness(&server);

    let (status, body) = get(&h.app, "/favicon.ico").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found");
}
