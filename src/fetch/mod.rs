//! Page fetching.
//!
//! The engine only needs raw markup for a URL. `PageFetcher` is the seam that
//! supplies it, so callers and tests can plug in their own source. The
//! production implementation is `HttpFetcher`, built on a shared
//! `reqwest::Client`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::error_handling::{categorize_reqwest_error, FetchError};

/// Source of raw page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the markup at `url`.
    ///
    /// Implementations must report non-2xx answers as `FetchError::Status`.
    /// They need not enforce a timeout themselves; `fetch_with_timeout`
    /// bounds every call.
    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// `PageFetcher` over HTTP.
///
/// Identifying User-Agent and `Accept` headers come from the client (see
/// `initialization::init_client`). Redirects are followed by reqwest's default
/// policy. Nothing is retried.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Arc<reqwest::Client>,
    timeout_ms: u64,
}

impl HttpFetcher {
    /// Wraps a shared client. `timeout_ms` is only used to label a
    /// client-level timeout consistently with the per-request one.
    pub fn new(client: Arc<reqwest::Client>, timeout_ms: u64) -> Self {
        Self { client, timeout_ms }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&e, self.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            debug!("Non-success status {} for {}", status.as_u16(), url);
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| categorize_reqwest_error(&e, self.timeout_ms))
    }
}

/// Runs one fetch bounded by its own timeout.
///
/// On expiry the in-flight fetch future is dropped, which cancels that request
/// only. Other fetches running concurrently are unaffected.
pub async fn fetch_with_timeout(
    fetcher: &dyn PageFetcher,
    url: &str,
    timeout_ms: u64,
) -> Result<String, FetchError> {
    match tokio::time::timeout(Duration::from_millis(timeout_ms), fetcher.fetch(url)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout(timeout_ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowFetcher {
        delay: Duration,
    }

    #[async_trait]
    impl PageFetcher for SlowFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            tokio::time::sleep(self.delay).await;
            Ok("<html></html>".to_string())
        }
    }

    #[tokio::test]
    async fn test_fetch_with_timeout_expires() {
        let fetcher = SlowFetcher {
            delay: Duration::from_millis(500),
        };
        let result = fetch_with_timeout(&fetcher, "https://slow.example/", 20).await;
        assert_eq!(result, Err(FetchError::Timeout(20)));
    }

    #[tokio::test]
    async fn test_fetch_with_timeout_passes_through() {
        let fetcher = SlowFetcher {
            delay: Duration::from_millis(1),
        };
        let result = fetch_with_timeout(&fetcher, "https://fast.example/", 1_000).await;
        assert_eq!(result.as_deref(), Ok("<html></html>"));
    }
}
