//! Proxy module
//!
//! Handles outbound calls to the upstream LLM provider.

pub mod agentic;
pub mod headers;
pub mod logging;
pub mod openai;
pub mod provider;

pub use agentic::{AgenticGateway, PromptPayload};
pub use logging::RequestContext;
pub use openai::OpenAIChatClient;
pub use provider::CompletionProvider;
