//! Request logging utilities for relay calls
//!
//! Provides structured logging with short correlation IDs so a single relay
//! call can be followed from the inbound request to the upstream response.

use std::time::Instant;
use tracing::{debug, info, warn, Span};
use uuid::Uuid;

/// Context for tracking a relay call through the system
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// Relay strategy handling this request
    pub strategy: &'static str,
    /// Upstream target (provider name or URL)
    pub upstream: String,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(strategy: &'static str, upstream: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            strategy,
            upstream: upstream.to_string(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log request initiation
    pub fn log_request_start(&self, prompt_len: usize) {
        info!(
            trace_id = %self.trace_id,
            strategy = %self.strategy,
            upstream = %self.upstream,
            prompt_len = %prompt_len,
            "Relay request started"
        );
    }

    /// Log request being sent to upstream
    pub fn log_upstream_request(&self, url: &str, header_count: usize) {
        debug!(
            trace_id = %self.trace_id,
            strategy = %self.strategy,
            url = %url,
            header_count = %header_count,
            elapsed_ms = %self.elapsed_ms(),
            "Sending request to upstream"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16, body_len: usize) {
        debug!(
            trace_id = %self.trace_id,
            strategy = %self.strategy,
            status = %status,
            body_len = %body_len,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log successful request completion
    pub fn log_request_complete(&self) {
        info!(
            trace_id = %self.trace_id,
            strategy = %self.strategy,
            upstream = %self.upstream,
            elapsed_ms = %self.elapsed_ms(),
            "Relay request completed"
        );
    }

    /// Log request failure
    pub fn log_error(&self, status: u16, error: &str) {
        warn!(
            trace_id = %self.trace_id,
            strategy = %self.strategy,
            upstream = %self.upstream,
            status = %status,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "Relay request failed"
        );
    }

    /// Create a tracing span for this request.
    ///
    /// Only entered once a request has passed validation.
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "relay_request",
            trace_id = %self.trace_id,
            strategy = %self.strategy,
        )
    }
}
