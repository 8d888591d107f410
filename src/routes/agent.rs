//! Agent relay endpoints
//!
//! - `GET  /api/agent/getAzOpenAIResponse?prompt=` - direct chat completion
//! - `GET  /api/agent/getResponse?prompt=` - forward with the default token budget
//! - `POST /api/agent/getResponse` - forward with a JSON `{prompt, maxTokens}` body

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    error::{AppError, AppResult},
    relay::{DirectRelay, ForwardRelay, PromptRequest, Relay, RelayReply, DEFAULT_MAX_TOKENS},
    routes::metrics::record_request,
    AppState,
};

/// Query string of the GET endpoints
#[derive(Debug, Deserialize)]
pub struct PromptQuery {
    pub prompt: Option<String>,
}

/// Prompt from a query string that may have failed to decode
fn query_prompt(query: Option<Query<PromptQuery>>) -> Option<String> {
    query.and_then(|Query(query)| query.prompt)
}

/// Direct chat-completion path.
///
/// An undecodable query string counts as a missing prompt.
pub async fn get_az_openai_response(
    State(state): State<Arc<AppState>>,
    query: Option<Query<PromptQuery>>,
) -> AppResult<RelayReply> {
    let relay = DirectRelay::new(state.provider.clone());
    run_relay(
        &relay,
        PromptRequest {
            prompt: query_prompt(query),
            max_tokens: None,
        },
    )
    .await
}

/// Forward path driven by the query string
pub async fn get_response(
    State(state): State<Arc<AppState>>,
    query: Option<Query<PromptQuery>>,
) -> AppResult<RelayReply> {
    let relay = ForwardRelay::new(state.gateway.clone());
    run_relay(
        &relay,
        PromptRequest {
            prompt: query_prompt(query),
            max_tokens: Some(DEFAULT_MAX_TOKENS),
        },
    )
    .await
}

/// Forward path driven by a JSON body.
///
/// A missing, non-JSON or syntactically broken body is treated like a
/// request without a prompt. Well-formed JSON with a mistyped field is
/// rejected as an invalid body.
pub async fn post_response(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PromptRequest>, JsonRejection>,
) -> AppResult<RelayReply> {
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::JsonDataError(rejection)) => {
            let err = AppError::InvalidBody(rejection.body_text());
            warn!(error = %err, "Rejected prompt request body");
            return Err(err);
        }
        Err(_) => PromptRequest::default(),
    };
    let relay = ForwardRelay::new(state.gateway.clone());
    run_relay(&relay, request).await
}

async fn run_relay(relay: &dyn Relay, request: PromptRequest) -> AppResult<RelayReply> {
    let start_time = Instant::now();
    let result = relay.relay(request).await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(err) => err.status_code(),
    };
    record_request(relay.name(), status, start_time.elapsed().as_secs_f64());

    result
}
