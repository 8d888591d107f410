//! Relay strategies
//!
//! Two independent ways of answering a prompt sit behind the `Relay`
//! contract:
//!
//! - [`direct::DirectRelay`] asks a [`CompletionProvider`](crate::proxy::CompletionProvider)
//!   for completion text.
//! - [`forward::ForwardRelay`] POSTs a prompt payload to the agentic endpoint
//!   and hands back the upstream body untouched.
//!
//! Every call is independent: one inbound request, at most one upstream
//! call, no retries.

pub mod direct;
pub mod forward;

use async_trait::async_trait;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;

use crate::error::AppResult;

pub use direct::DirectRelay;
pub use forward::ForwardRelay;

/// Token budget used when the caller does not send one
pub const DEFAULT_MAX_TOKENS: i32 = 512;

/// Inbound prompt request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromptRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default, rename = "maxTokens", alias = "max_tokens")]
    pub max_tokens: Option<i32>,
}

impl PromptRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: Some(prompt.into()),
            max_tokens: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: i32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Requested token budget, falling back to [`DEFAULT_MAX_TOKENS`]
    pub fn max_tokens_or_default(&self) -> i32 {
        self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS)
    }
}

/// Successful relay outcome
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayReply {
    /// Completion text from the direct path
    Completion(String),
    /// Upstream JSON body from the forward path, byte for byte
    Raw(Bytes),
}

impl IntoResponse for RelayReply {
    fn into_response(self) -> Response {
        match self {
            RelayReply::Completion(text) => (StatusCode::OK, text).into_response(),
            RelayReply::Raw(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
        }
    }
}

/// One way of answering a prompt request
#[async_trait]
pub trait Relay: Send + Sync {
    /// Strategy name for logging and metrics
    fn name(&self) -> &'static str;

    /// Answer a single prompt request
    async fn relay(&self, request: PromptRequest) -> AppResult<RelayReply>;
}
