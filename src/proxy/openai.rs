//! OpenAI-compatible chat completion client
//!
//! Sends a prompt as a single user message to a chat-completion API and
//! flattens the returned message content into one string.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::{
    config::ProviderConfig,
    error::UpstreamError,
    proxy::{headers, provider::CompletionProvider},
};

/// Chat completion request body
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
}

/// Chat message sent upstream
#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Chat completion response body (only the parts the relay reads)
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// A single completion choice
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ResponseMessage,
}

/// Assistant message returned by the provider
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// Message content is either plain text or a list of content parts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

/// A content part; non-text parts carry no `text`
#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

impl ChatCompletionResponse {
    /// Textual fragments of the first choice, in order
    pub fn fragments(&self) -> Vec<&str> {
        let Some(content) = self.choices.first().and_then(|c| c.message.content.as_ref()) else {
            return Vec::new();
        };

        match content {
            MessageContent::Text(text) => vec![text.as_str()],
            MessageContent::Parts(parts) => {
                parts.iter().filter_map(|p| p.text.as_deref()).collect()
            }
        }
    }

    /// Join all fragments, each preceded by a single space
    pub fn text(&self) -> String {
        self.fragments().iter().fold(String::new(), |mut message, fragment| {
            message.push(' ');
            message.push_str(fragment);
            message
        })
    }
}

/// Chat completion client for the direct relay path
pub struct OpenAIChatClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAIChatClient {
    /// Create a new chat completion client
    pub fn new(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: config.chat_endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionProvider for OpenAIChatClient {
    fn name(&self) -> &'static str {
        "openai"
    }

    #[instrument(skip_all)]
    async fn get_response(&self, prompt: &str) -> Result<String, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;

        let url = self.completions_url();
        let mut request_headers = headers::build_default_headers();
        request_headers.insert(AUTHORIZATION, headers::bearer_value(api_key)?);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!(url = %url, model = %self.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .headers(request_headers)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(url = %url, error = %e, "Failed to send chat completion request");
                e
            })?;

        let status = response.status();
        let bytes = response.bytes().await?;
        debug!(status = %status, body_len = bytes.len(), "Chat completion response received");

        if !status.is_success() {
            return Err(UpstreamError::Status {
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let completion: ChatCompletionResponse = serde_json::from_slice(&bytes)?;
        Ok(completion.text())
    }
}
