//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::ClientBuilder;

use crate::config::{Config, ACCEPT_HTML};
use crate::error_handling::InitializationError;

/// Initializes the shared HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - the identifying User-Agent from the config
/// - `Accept: text/html,application/xhtml+xml` on every request
/// - a client-level timeout equal to the per-request timeout
///
/// The per-request timeout is also enforced around each fetch, so the
/// client-level one is a backstop for the connect phase.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails,
/// for example when the User-Agent is not a valid header value.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, InitializationError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

    let client = ClientBuilder::new()
        .timeout(Duration::from_millis(config.limits.timeout_ms))
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .build()?;
    Ok(Arc::new(client))
}
