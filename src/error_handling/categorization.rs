//! Error categorization.
//!
//! This module maps transport-level failures and extraction errors onto the
//! flat `ErrorType` taxonomy used for statistics.

use super::types::{ErrorType, ExtractionError, FetchError};

/// Categorizes a `reqwest::Error` into a `FetchError`.
///
/// The client-level timeout and the per-request timeout wrapper report the
/// same way, so both yield `FetchError::Timeout` carrying the configured
/// limit.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
/// * `timeout_ms` - The per-request timeout that was in force
pub fn categorize_reqwest_error(error: &reqwest::Error, timeout_ms: u64) -> FetchError {
    if error.is_timeout() {
        return FetchError::Timeout(timeout_ms);
    }
    if let Some(status) = error.status() {
        return FetchError::Status(status.as_u16());
    }
    FetchError::Transport(describe_reqwest_error(error))
}

/// Builds a short, stable description of a transport error.
fn describe_reqwest_error(error: &reqwest::Error) -> String {
    let kind = if error.is_connect() {
        "connect error"
    } else if error.is_redirect() {
        "redirect error"
    } else if error.is_body() {
        "body error"
    } else if error.is_decode() {
        "decode error"
    } else if error.is_builder() {
        "request builder error"
    } else if error.is_request() {
        "request error"
    } else {
        "error"
    };

    format!("{kind}: {error}")
}

impl ExtractionError {
    /// Returns the statistics category for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ExtractionError::InvalidUrl => ErrorType::InvalidUrl,
            ExtractionError::Fetch(FetchError::Status(_)) => ErrorType::HttpStatusError,
            ExtractionError::Fetch(FetchError::Timeout(_)) => ErrorType::HttpTimeoutError,
            ExtractionError::Fetch(FetchError::Transport(_)) => ErrorType::HttpTransportError,
            ExtractionError::JsonLdParse => ErrorType::JsonLdParseError,
            ExtractionError::MicrodataParse(_) => ErrorType::MicrodataParseError,
            ExtractionError::RdfaParse(_) => ErrorType::RdfaParseError,
            ExtractionError::NoStructuredData => ErrorType::NoStructuredData,
            ExtractionError::WorkerPanicked => ErrorType::WorkerPanicked,
        }
    }
}
