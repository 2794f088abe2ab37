// ABOUTME: Integration tests for the MCP stdio surface and WHOOP tool dispatch
// ABOUTME: Drives JSON-RPC lines through the transport against a wiremock WHOOP API
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use serde_json::{json, Value};
use tokio::io::BufReader;
use whoop_mcp_server::mcp::StdioTransport;
use wiremock::matchers::{any, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tool_text(response: &Value) -> (&str, bool) {
    let result = &response["result"];
    let text = result["content"][0]["text"].as_str().unwrap();
    let is_error = result["isError"].as_bool().unwrap();
    (text, is_error)
}

async fn call(transport: &StdioTransport, line: &str) -> Value {
    let response = transport.process_line(line).await.unwrap();
    serde_json::to_value(response).unwrap()
}

#[tokio::test]
async fn test_get_cycle_by_id_echoes_payload() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);
    client.set_access_token("token-123").await;
    let transport = common::transport_for(client);

    Mock::given(method("GET"))
        .and(path("/developer/v2/cycle/123"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_cycle(123)))
        .expect(1)
        .mount(&server)
        .await;

    let line = common::tool_call_line(1, "whoop-get-cycle-by-id", json!({"cycleId": 123}));
    let response = call(&transport, &line).await;
    assert_eq!(response["id"], 1);

    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    let echoed: Value = serde_json::from_str(text).unwrap();
    assert_eq!(echoed, common::sample_cycle(123));
    assert!(text.contains('\n'), "payload should be pretty-printed");
}

#[tokio::test]
async fn test_mistyped_argument_makes_no_request() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let line = common::tool_call_line(2, "whoop-get-cycle-by-id", json!({"cycleId": "123"}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(is_error);
    assert_eq!(text, "Error: cycleId is required and must be a number");

    let line = common::tool_call_line(3, "whoop-get-sleep-by-id", json!({}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(is_error);
    assert_eq!(text, "Error: sleepId is required and must be a string");
}

#[tokio::test]
async fn test_remote_failure_becomes_error_envelope() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    Mock::given(method("GET"))
        .and(path("/developer/v2/recovery"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .expect(1)
        .mount(&server)
        .await;

    let line = common::tool_call_line(4, "whoop-get-recovery-collection", json!({"limit": 5}));
    let response = call(&transport, &line).await;
    assert!(response.get("error").is_none(), "tool failures are not JSON-RPC errors");
    let (text, is_error) = tool_text(&response);
    assert!(is_error);
    assert!(text.starts_with("Error: "));
    assert!(text.contains("429"));
    assert!(text.contains("rate limited"));
}

#[tokio::test]
async fn test_set_access_token_applies_to_later_calls() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    Mock::given(method("GET"))
        .and(path("/developer/v2/user/profile/basic"))
        .and(header("authorization", "Bearer from-tool"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_profile()))
        .expect(1)
        .mount(&server)
        .await;

    let line = common::tool_call_line(
        5,
        "whoop-set-access-token",
        json!({"accessToken": "from-tool"}),
    );
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    assert_eq!(text, "Access token set successfully");

    let line = common::tool_call_line(6, "whoop-get-user-profile", json!({}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    assert!(text.contains("jsmith123@whoop.com"));
}

#[tokio::test]
async fn test_revoke_returns_confirmation() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    Mock::given(method("DELETE"))
        .and(path("/developer/v2/user/access"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let line = common::tool_call_line(7, "whoop-revoke-user-access", json!({}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    assert_eq!(text, "User access revoked successfully");
}

#[tokio::test]
async fn test_exchange_tool_returns_tokens_without_storing_them() {
    let server = MockServer::start().await;
    let client = common::client_for(&server);
    let transport = common::transport_for(client.clone());

    Mock::given(method("POST"))
        .and(path("/oauth/oauth2/token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_token_response()))
        .expect(1)
        .mount(&server)
        .await;

    let line =
        common::tool_call_line(8, "whoop-exchange-code-for-token", json!({"code": "abc123"}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    let tokens: Value = serde_json::from_str(text).unwrap();
    assert_eq!(tokens["access_token"], "fresh-access-token");
    assert_eq!(tokens["expires_in"], 3600);
    assert!(client.access_token().await.is_none());
}

#[tokio::test]
async fn test_authorization_url_tool() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    let line = common::tool_call_line(9, "whoop-get-authorization-url", json!({}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    let url = text.strip_prefix("Authorization URL: ").unwrap();
    assert!(url.starts_with(&format!("{}/oauth/oauth2/auth?", server.uri())));
    assert!(url.contains("client_id=test-client-id"));
    assert!(!url.contains("state="));
}

#[tokio::test]
async fn test_unknown_tool_is_error_envelope() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    let line = common::tool_call_line(10, "whoop-get-journal", json!({}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(is_error);
    assert_eq!(text, "Error: Unknown tool: whoop-get-journal");
}

#[tokio::test]
async fn test_protocol_methods() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    let init = call(
        &transport,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
    )
    .await;
    assert_eq!(init["result"]["serverInfo"]["name"], "whoop-mcp-server");
    assert!(init["result"]["capabilities"]["tools"].is_object());

    let ping = call(&transport, r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#).await;
    assert_eq!(ping["id"], "p");
    assert_eq!(ping["result"], json!({}));

    let list = call(&transport, r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
    let tools = list["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 16);
    let cycle = tools
        .iter()
        .find(|t| t["name"] == "whoop-get-cycle-by-id")
        .unwrap();
    assert_eq!(cycle["inputSchema"]["required"], json!(["cycleId"]));
}

#[tokio::test]
async fn test_protocol_errors() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    let parse = call(&transport, "{not json").await;
    assert_eq!(parse["error"]["code"], -32700);
    assert_eq!(parse["id"], Value::Null);

    let unknown = call(&transport, r#"{"jsonrpc":"2.0","id":3,"method":"resources/list"}"#).await;
    assert_eq!(unknown["error"]["code"], -32601);

    let version = call(&transport, r#"{"jsonrpc":"1.0","id":4,"method":"ping"}"#).await;
    assert_eq!(version["error"]["code"], -32600);

    let no_name = call(
        &transport,
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"arguments":{}}}"#,
    )
    .await;
    assert_eq!(no_name["error"]["code"], -32602);

    let notification = transport
        .process_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
        .await;
    assert!(notification.is_none());
}

#[tokio::test]
async fn test_serve_answers_each_line_in_order() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
        "\n\n",
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
        "\n",
    );
    let mut output: Vec<u8> = Vec::new();
    transport
        .serve(BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    let lines: Vec<Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["id"], 1);
    assert_eq!(lines[1]["id"], 2);
}

#[tokio::test]
async fn test_explicit_nulls_are_echoed() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    let pending_cycle = json!({
        "id": 123,
        "end": null,
        "score": null,
        "score_state": "PENDING_SCORE"
    });
    let last_page = json!({"records": [], "next_token": null});

    Mock::given(method("GET"))
        .and(path("/developer/v2/cycle/123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pending_cycle.clone()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/developer/v2/cycle"))
        .respond_with(ResponseTemplate::new(200).set_body_json(last_page.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let line = common::tool_call_line(11, "whoop-get-cycle-by-id", json!({"cycleId": 123}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    assert_eq!(serde_json::from_str::<Value>(text).unwrap(), pending_cycle);

    let line = common::tool_call_line(12, "whoop-get-cycle-collection", json!({}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(!is_error);
    assert_eq!(serde_json::from_str::<Value>(text).unwrap(), last_page);
}

#[tokio::test]
async fn test_unauthorized_error_suggests_reauthentication() {
    let server = MockServer::start().await;
    let transport = common::transport_for(common::client_for(&server));

    Mock::given(method("GET"))
        .and(path("/developer/v2/user/measurement/body"))
        .respond_with(ResponseTemplate::new(401).set_body_string("expired"))
        .expect(1)
        .mount(&server)
        .await;

    let line = common::tool_call_line(13, "whoop-get-user-body-measurements", json!({}));
    let response = call(&transport, &line).await;
    let (text, is_error) = tool_text(&response);
    assert!(is_error);
    assert!(text.contains("401"));
    assert!(text.contains("run whoop-auth"));
}
