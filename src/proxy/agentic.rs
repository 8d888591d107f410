//! Agentic AI gateway transport
//!
//! Issues the raw HTTP call of the forward relay path: one JSON POST of the
//! prompt payload to the configured endpoint, with the API key attached the
//! way the configuration asks for.

use bytes::Bytes;
use serde::Serialize;
use tracing::error;

use crate::{
    config::{AuthScheme, ProviderConfig},
    error::UpstreamError,
    proxy::{headers, logging::RequestContext},
};

/// Outbound body of the forward path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPayload {
    pub prompt: String,
    pub max_tokens: i32,
}

/// Raw HTTP client for the agentic endpoint
pub struct AgenticGateway {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    auth_scheme: AuthScheme,
}

impl AgenticGateway {
    /// Create a new gateway client
    pub fn new(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
            auth_scheme: config.auth_scheme(),
        }
    }

    /// Endpoint every payload is posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Build the outbound header set, including the API key when configured
    pub fn request_headers(&self) -> Result<reqwest::header::HeaderMap, UpstreamError> {
        let mut request_headers = headers::build_default_headers();
        if let Some(api_key) = &self.api_key {
            headers::apply_api_key(&mut request_headers, &self.auth_scheme, api_key)?;
        }
        Ok(request_headers)
    }

    /// POST the payload and return the upstream body unmodified.
    ///
    /// The whole body is read whatever the status; a non-success status is
    /// returned as `UpstreamError::Status` carrying that body as text.
    pub async fn post_prompt(
        &self,
        payload: &PromptPayload,
        ctx: &RequestContext,
    ) -> Result<Bytes, UpstreamError> {
        let request_headers = self.request_headers()?;
        ctx.log_upstream_request(&self.endpoint, request_headers.len());

        let response = self
            .client
            .post(&self.endpoint)
            .headers(request_headers)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                error!(trace_id = %ctx.trace_id, url = %self.endpoint, error = %e, "Connection to upstream failed");
                e
            })?;

        let status = response.status();
        let body = response.bytes().await?;
        ctx.log_upstream_response(status.as_u16(), body.len());

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body)
    }
}
