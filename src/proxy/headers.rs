//! Header utilities for upstream requests
//!
//! Builds the outbound header set and attaches the configured API key.
//! Client headers are never forwarded upstream.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::{config::AuthScheme, error::UpstreamError};

/// Build the default headers sent with every upstream request
pub fn build_default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Build an `Authorization: Bearer` header value
pub fn bearer_value(api_key: &str) -> Result<HeaderValue, UpstreamError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|e| UpstreamError::InvalidHeader(e.to_string()))?;
    value.set_sensitive(true);
    Ok(value)
}

/// Attach the API key according to the configured scheme.
///
/// The Bearer credential replaces any existing `Authorization` value. A
/// custom header is only added when the header set does not already carry
/// it.
pub fn apply_api_key(
    headers: &mut HeaderMap,
    scheme: &AuthScheme,
    api_key: &str,
) -> Result<(), UpstreamError> {
    match scheme {
        AuthScheme::Bearer => {
            headers.insert(AUTHORIZATION, bearer_value(api_key)?);
        }
        AuthScheme::Header(name) => {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| UpstreamError::InvalidHeader(e.to_string()))?;
            if !headers.contains_key(&name) {
                let mut value = HeaderValue::from_str(api_key)
                    .map_err(|e| UpstreamError::InvalidHeader(e.to_string()))?;
                value.set_sensitive(true);
                headers.insert(name, value);
            }
        }
    }
    Ok(())
}
