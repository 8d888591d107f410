//! Forward relay integration tests
//!
//! Tests for the generic HTTP-forward path:
//! - GET /api/agent/getResponse?prompt=
//! - POST /api/agent/getResponse
//! - Prompt validation, payload shape, API-key attachment
//! - Upstream status propagation and transport failures

use axum::http::{header, HeaderValue, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{constants, unreachable_server, RelayTestHarness};
use crate::mocks::{MockUpstream, COMPLETIONS_PATH};

const ENDPOINT: &str = "/api/agent/getResponse";

const UPSTREAM_BODY: &str = r#"{"id":"cmpl-1",  "choices":[{"text":"Hi!","index":0}] , "note":"café"}"#;

#[tokio::test]
async fn test_post_defaults_max_tokens() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let response = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let requests = harness.upstream.requests_to(COMPLETIONS_PATH).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        MockUpstream::body_json(&requests[0]),
        json!({ "prompt": "hello", "max_tokens": 512 })
    );
}

#[tokio::test]
async fn test_post_uses_supplied_max_tokens() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let response = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "tell me a story", "maxTokens": 100 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let requests = harness.upstream.requests_to(COMPLETIONS_PATH).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        MockUpstream::body_json(&requests[0]),
        json!({ "prompt": "tell me a story", "max_tokens": 100 })
    );
}

#[tokio::test]
async fn test_post_forwards_negative_max_tokens() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let response = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "hello", "maxTokens": -1 }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let requests = harness.upstream.requests_to(COMPLETIONS_PATH).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        MockUpstream::body_json(&requests[0]),
        json!({ "prompt": "hello", "max_tokens": -1 })
    );
}

#[tokio::test]
async fn test_post_mistyped_field_is_invalid_body() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let response = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "hello", "maxTokens": "ten" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let json: Value = response.json();
    assert_eq!(json["error"], "invalid request body");
    assert!(json["details"].as_str().unwrap().contains("maxTokens"));
    assert_eq!(harness.upstream.request_count().await, 0);
}

#[tokio::test]
async fn test_get_uses_default_max_tokens() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let response = harness
        .server
        .get(ENDPOINT)
        .add_query_param("prompt", "hello world")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);

    let requests = harness.upstream.requests_to(COMPLETIONS_PATH).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        MockUpstream::body_json(&requests[0]),
        json!({ "prompt": "hello world", "max_tokens": 512 })
    );
}

#[tokio::test]
async fn test_success_body_is_returned_verbatim() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let response = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("content-type"), "application/json");
    assert_eq!(response.text(), UPSTREAM_BODY);
}

#[tokio::test]
async fn test_empty_prompt_rejected_without_upstream_call() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let response = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "prompt is required" }));
    assert_eq!(harness.upstream.request_count().await, 0);
}

#[tokio::test]
async fn test_blank_missing_or_absent_prompt_rejected() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let whitespace = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "  \t " }))
        .await;
    let missing_field = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "maxTokens": 10 }))
        .await;
    let no_body = harness.server.post(ENDPOINT).await;
    let no_query = harness.server.get(ENDPOINT).await;
    let blank_query = harness
        .server
        .get(ENDPOINT)
        .add_query_param("prompt", "   ")
        .await;
    let broken_json = harness
        .server
        .post(ENDPOINT)
        .text(r#"{"prompt":"hello""#)
        .content_type("application/json")
        .await;

    for response in [whitespace, missing_field, no_body, no_query, blank_query, broken_json] {
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({ "error": "prompt is required" }));
    }
    assert_eq!(harness.upstream.request_count().await, 0);
}

#[tokio::test]
async fn test_undecodable_query_is_missing_prompt() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let response = harness
        .server
        .get(&format!("{ENDPOINT}?prompt=a&prompt=b"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({ "error": "prompt is required" }));
    assert_eq!(harness.upstream.request_count().await, 0);
}

#[tokio::test]
async fn test_upstream_status_and_body_propagated() {
    let harness = RelayTestHarness::new().await;
    harness
        .upstream
        .mock_completion_status(429, r#"{"error":"rate_limited"}"#)
        .await;

    let response = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        response.json::<Value>(),
        json!({
            "error": "AgenticAI call failed",
            "details": "{\"error\":\"rate_limited\"}"
        })
    );
    // No retry after a failure
    assert_eq!(harness.upstream.requests_to(COMPLETIONS_PATH).await.len(), 1);
}

#[tokio::test]
async fn test_upstream_server_error_propagated() {
    let harness = RelayTestHarness::new().await;
    harness
        .upstream
        .mock_completion_status(503, "upstream overloaded")
        .await;

    let response = harness
        .server
        .get(ENDPOINT)
        .add_query_param("prompt", "hello")
        .await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let json: Value = response.json();
    assert_eq!(json["error"], "AgenticAI call failed");
    assert_eq!(json["details"], "upstream overloaded");
}

#[tokio::test]
async fn test_bearer_scheme_any_case() {
    let harness =
        RelayTestHarness::with_auth(Some(constants::TEST_API_KEY), "authorization").await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "hello" }))
        .await;

    let requests = harness.upstream.requests_to(COMPLETIONS_PATH).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        MockUpstream::header_value(&requests[0], "authorization"),
        Some(format!("Bearer {}", constants::TEST_API_KEY))
    );
}

#[tokio::test]
async fn test_custom_key_header() {
    let harness = RelayTestHarness::with_auth(Some(constants::TEST_API_KEY), "api-key").await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "hello" }))
        .await;

    let requests = harness.upstream.requests_to(COMPLETIONS_PATH).await;
    assert_eq!(requests.len(), 1);
    assert_eq!(
        MockUpstream::header_value(&requests[0], "api-key"),
        Some(constants::TEST_API_KEY.to_string())
    );
    assert_eq!(MockUpstream::header_value(&requests[0], "authorization"), None);
}

#[tokio::test]
async fn test_no_api_key_sends_no_credential() {
    let harness = RelayTestHarness::with_auth(None, "api-key").await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let response = harness
        .server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let requests = harness.upstream.requests_to(COMPLETIONS_PATH).await;
    assert_eq!(MockUpstream::header_value(&requests[0], "api-key"), None);
    assert_eq!(MockUpstream::header_value(&requests[0], "authorization"), None);
}

#[tokio::test]
async fn test_client_authorization_not_forwarded() {
    let harness = RelayTestHarness::with_auth(None, "Authorization").await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    harness
        .server
        .post(ENDPOINT)
        .add_header(header::AUTHORIZATION, "Bearer client-token".parse::<HeaderValue>().unwrap())
        .json(&json!({ "prompt": "hello" }))
        .await;

    let requests = harness.upstream.requests_to(COMPLETIONS_PATH).await;
    assert_eq!(MockUpstream::header_value(&requests[0], "authorization"), None);
}

#[tokio::test]
async fn test_concurrent_requests_each_make_one_call() {
    let harness = RelayTestHarness::new().await;
    harness.upstream.mock_completion_success(UPSTREAM_BODY).await;

    let server = &harness.server;
    let (a, b, c) = tokio::join!(
        async { server.post(ENDPOINT).json(&json!({ "prompt": "a" })).await },
        async { server.post(ENDPOINT).json(&json!({ "prompt": "b" })).await },
        async { server.get(ENDPOINT).add_query_param("prompt", "c").await },
    );

    for response in [a, b, c] {
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    let mut prompts: Vec<String> = harness
        .upstream
        .requests_to(COMPLETIONS_PATH)
        .await
        .iter()
        .map(|r| MockUpstream::body_json(r)["prompt"].as_str().unwrap().to_string())
        .collect();
    prompts.sort();
    assert_eq!(prompts, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_transport_failure_is_internal_error() {
    let server = unreachable_server();

    let response = server
        .post(ENDPOINT)
        .json(&json!({ "prompt": "hello" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = response.json();
    assert_eq!(json["error"], "internal_error");
    assert!(!json["details"].as_str().unwrap().is_empty());

    // The server keeps answering after a failed request
    let again = server.get(ENDPOINT).add_query_param("prompt", "hi").await;
    assert_eq!(again.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
}
