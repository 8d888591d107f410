//! Completion provider abstraction
//!
//! Defines the trait the direct relay path uses to obtain a completion for
//! a prompt, so the concrete provider client can be swapped in tests.

use async_trait::async_trait;

use crate::error::UpstreamError;

/// A provider able to turn a single prompt into completion text
///
/// # Contract
///
/// Implementations issue exactly one upstream call per invocation, send the
/// prompt verbatim as a single user message, and never retry.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging and metrics
    fn name(&self) -> &'static str;

    /// Get the completion text for `prompt`
    async fn get_response(&self, prompt: &str) -> Result<String, UpstreamError>;
}
