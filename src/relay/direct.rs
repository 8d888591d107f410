//! Direct provider relay
//!
//! Obtains completion text from a [`CompletionProvider`]. Every provider
//! failure is reported as an internal error; the failure kind is not
//! surfaced to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use tracing::Instrument;

use crate::{
    error::{AppError, AppResult},
    proxy::{CompletionProvider, RequestContext},
    relay::{PromptRequest, Relay, RelayReply},
};

/// Relay backed by a completion provider
pub struct DirectRelay {
    provider: Arc<dyn CompletionProvider>,
}

impl DirectRelay {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Relay for DirectRelay {
    fn name(&self) -> &'static str {
        "direct"
    }

    async fn relay(&self, request: PromptRequest) -> AppResult<RelayReply> {
        let ctx = RequestContext::new(self.name(), self.provider.name());

        // No blank check here: an empty prompt still goes upstream.
        let Some(prompt) = request.prompt else {
            let err = AppError::Internal("prompt parameter is missing".to_string());
            ctx.log_error(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), &err.to_string());
            return Err(err);
        };

        let span = ctx.create_span();
        async {
            ctx.log_request_start(prompt.len());

            match self.provider.get_response(&prompt).await {
                Ok(text) => {
                    ctx.log_request_complete();
                    Ok(RelayReply::Completion(text))
                }
                Err(err) => {
                    let message = err.to_string();
                    ctx.log_error(StatusCode::INTERNAL_SERVER_ERROR.as_u16(), &message);
                    Err(AppError::Internal(message))
                }
            }
        }
        .instrument(span)
        .await
    }
}
