//! Configuration management for the relay
//!
//! Configuration is loaded from environment variables once at start-up and
//! shared read-only by every request.

use anyhow::{Context, Result};
use reqwest::header::{HeaderName, HeaderValue, AUTHORIZATION};
use std::env;

/// Default model used by the direct chat-completion path
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default header name carrying the API key
pub const DEFAULT_API_KEY_HEADER: &str = "Authorization";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Upstream provider settings
    pub provider: ProviderConfig,

    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
}

/// Upstream LLM provider settings
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// URL the forward path POSTs prompt payloads to
    pub endpoint: String,
    /// Base URL of the chat-completion API used by the direct path
    pub chat_endpoint: String,
    /// API key; `None` when unset or blank
    pub api_key: Option<String>,
    /// Header carrying the API key on the forward path
    pub api_key_header: String,
    /// Model requested by the direct path
    pub model: String,
}

/// How the API key is attached to forwarded requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `<name>: <key>`
    Header(String),
}

impl ProviderConfig {
    /// Resolve the auth scheme from the configured header name.
    ///
    /// `Authorization` in any letter case selects the Bearer scheme; any
    /// other name is sent as a literal header.
    pub fn auth_scheme(&self) -> AuthScheme {
        if self
            .api_key_header
            .eq_ignore_ascii_case(AUTHORIZATION.as_str())
        {
            AuthScheme::Bearer
        } else {
            AuthScheme::Header(self.api_key_header.clone())
        }
    }

    fn validate(&self) -> Result<()> {
        HeaderName::from_bytes(self.api_key_header.as_bytes())
            .context("Invalid AGENTIC_AI_API_KEY_HEADER")?;
        if let Some(key) = &self.api_key {
            HeaderValue::from_str(&format!("Bearer {}", key))
                .context("Invalid AGENTIC_AI_API_KEY")?;
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup("AGENTIC_AI_ENDPOINT")
            .filter(|v| !v.trim().is_empty())
            .context("AGENTIC_AI_ENDPOINT must be set")?;

        let provider = ProviderConfig {
            chat_endpoint: lookup("AGENTIC_AI_CHAT_ENDPOINT")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| endpoint.clone()),
            endpoint,
            api_key: lookup("AGENTIC_AI_API_KEY").filter(|v| !v.trim().is_empty()),
            api_key_header: lookup("AGENTIC_AI_API_KEY_HEADER")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string()),
            model: lookup("AGENTIC_AI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        };
        provider.validate()?;

        Ok(Self {
            host: lookup("RELAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("RELAY_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("Invalid RELAY_PORT")?,
            provider,
            log_json: lookup("RELAY_LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }
}
