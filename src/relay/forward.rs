//! Generic HTTP forward relay
//!
//! Validates the prompt, builds the `{prompt, max_tokens}` payload and hands
//! it to the [`AgenticGateway`]. Upstream status codes are propagated with
//! the raw body; transport failures become internal errors.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::Instrument;

use crate::{
    error::{AppError, AppResult},
    proxy::{AgenticGateway, PromptPayload, RequestContext},
    relay::{PromptRequest, Relay, RelayReply},
};

/// Relay forwarding prompt payloads over raw HTTP
pub struct ForwardRelay {
    gateway: Arc<AgenticGateway>,
}

impl ForwardRelay {
    pub fn new(gateway: Arc<AgenticGateway>) -> Self {
        Self { gateway }
    }

    /// Validate the request and build the outbound payload.
    ///
    /// Fails with [`AppError::PromptRequired`] when the prompt is missing or
    /// only whitespace.
    pub fn build_payload(request: PromptRequest) -> AppResult<PromptPayload> {
        let max_tokens = request.max_tokens_or_default();
        match request.prompt {
            Some(prompt) if !prompt.trim().is_empty() => Ok(PromptPayload { prompt, max_tokens }),
            _ => Err(AppError::PromptRequired),
        }
    }
}

#[async_trait]
impl Relay for ForwardRelay {
    fn name(&self) -> &'static str {
        "forward"
    }

    async fn relay(&self, request: PromptRequest) -> AppResult<RelayReply> {
        let ctx = RequestContext::new(self.name(), self.gateway.endpoint());

        let payload = match Self::build_payload(request) {
            Ok(payload) => payload,
            Err(err) => {
                ctx.log_error(err.status_code().as_u16(), &err.to_string());
                return Err(err);
            }
        };

        let span = ctx.create_span();
        async {
            ctx.log_request_start(payload.prompt.len());

            match self.gateway.post_prompt(&payload, &ctx).await {
                Ok(body) => {
                    ctx.log_request_complete();
                    Ok(RelayReply::Raw(body))
                }
                Err(err) => {
                    let err = AppError::from(err);
                    ctx.log_error(err.status_code().as_u16(), &err.to_string());
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }
}
