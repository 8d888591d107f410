//! Agentic Relay - thin HTTP relay to an upstream LLM provider
//!
//! Accepts prompt requests over REST and answers them either through a
//! chat-completion client (direct path) or by forwarding a raw prompt
//! payload to the configured endpoint (forward path).

pub mod config;
pub mod error;
pub mod proxy;
pub mod relay;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::{Config, ProviderConfig};
pub use crate::proxy::{AgenticGateway, CompletionProvider, OpenAIChatClient};
pub use crate::relay::{DirectRelay, ForwardRelay, PromptRequest, Relay, RelayReply};

/// Application state shared across all request handlers
///
/// Built once at start-up and never mutated afterwards.
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Completion provider used by the direct path
    pub provider: Arc<dyn CompletionProvider>,
    /// Raw HTTP transport used by the forward path
    pub gateway: Arc<AgenticGateway>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Pooled client shared by both paths; no request timeout is set
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .build()?;

        let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAIChatClient::new(
            http_client.clone(),
            &config.provider,
        ));

        Ok(Self::with_provider(config, http_client, provider))
    }

    /// Create an application state around an existing client and provider
    pub fn with_provider(
        config: Config,
        http_client: reqwest::Client,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        let gateway = Arc::new(AgenticGateway::new(http_client, &config.provider));

        Self {
            config,
            start_time: Instant::now(),
            provider,
            gateway,
        }
    }
}
