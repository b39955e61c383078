//! Error type definitions.
//!
//! This module defines all error types used throughout the application, from
//! startup failures to the per-URL extraction taxonomy.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::{MSG_INVALID_URL, MSG_JSONLD_PARSE_FAILURE, MSG_NO_STRUCTURED_DATA};

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Why a page could not be fetched.
///
/// Every variant is terminal for its URL: nothing is retried and no parsing
/// is attempted afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Status(u16),

    /// The request did not complete within the per-request timeout.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// Connection, TLS, redirect or body read failure.
    #[error("Request failed: {0}")]
    Transport(String),
}

/// Errors recorded in a per-URL result.
///
/// `InvalidUrl` and `Fetch` make a result fail (`ok == false`). The others are
/// advisory: the result stays `ok` and keeps whatever the other formats found.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The input did not validate as an absolute http(s) URL.
    #[error("{}", MSG_INVALID_URL)]
    InvalidUrl,

    /// The page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// One JSON-LD script block could not be decoded.
    #[error("{}", MSG_JSONLD_PARSE_FAILURE)]
    JsonLdParse,

    /// Microdata traversal failed for the page.
    #[error("Microdata parse failure: {0}")]
    MicrodataParse(String),

    /// RDFa traversal failed for the page.
    #[error("RDFa parse failure: {0}")]
    RdfaParse(String),

    /// None of the three formats produced anything.
    #[error("{}", MSG_NO_STRUCTURED_DATA)]
    NoStructuredData,

    /// The unit of work for this URL panicked before producing a result.
    #[error("Extraction aborted unexpectedly")]
    WorkerPanicked,
}

/// Flat classification of every error a result can carry.
///
/// Used for run statistics; the categories are stable and iterable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Input rejected before fetching
    InvalidUrl,
    // Fetch failures
    /// Non-2xx response
    HttpStatusError,
    /// Per-request timeout expired
    HttpTimeoutError,
    /// Connection or body read failure
    HttpTransportError,
    // Advisory extraction failures
    /// A JSON-LD block failed to decode
    JsonLdParseError,
    /// Microdata traversal failed
    MicrodataParseError,
    /// RDFa traversal failed
    RdfaParseError,
    /// No format produced anything
    NoStructuredData,
    /// The unit of work panicked
    WorkerPanicked,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Returns a human-readable label for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::InvalidUrl => "Invalid URL",
            ErrorType::HttpStatusError => "HTTP status error",
            ErrorType::HttpTimeoutError => "HTTP request timeout",
            ErrorType::HttpTransportError => "HTTP transport error",
            ErrorType::JsonLdParseError => "JSON-LD parse error",
            ErrorType::MicrodataParseError => "Microdata parse error",
            ErrorType::RdfaParseError => "RDFa parse error",
            ErrorType::NoStructuredData => "No structured data",
            ErrorType::WorkerPanicked => "Worker panicked",
        }
    }

    /// Whether this category fails the whole result rather than annotating it.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ErrorType::InvalidUrl
                | ErrorType::HttpStatusError
                | ErrorType::HttpTimeoutError
                | ErrorType::HttpTransportError
                | ErrorType::WorkerPanicked
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP 404");
        assert_eq!(
            FetchError::Timeout(12_000).to_string(),
            "Request timed out after 12000 ms"
        );
        assert_eq!(
            FetchError::Transport("connection refused".into()).to_string(),
            "Request failed: connection refused"
        );
    }

    #[test]
    fn test_extraction_error_messages() {
        assert_eq!(ExtractionError::InvalidUrl.to_string(), "Invalid URL");
        assert_eq!(
            ExtractionError::JsonLdParse.to_string(),
            "JSON-LD block parse failure"
        );
        assert_eq!(
            ExtractionError::NoStructuredData.to_string(),
            "No structured data found"
        );
        // Fetch errors display exactly like the underlying fetch error
        assert_eq!(
            ExtractionError::from(FetchError::Status(503)).to_string(),
            "HTTP 503"
        );
    }

    #[test]
    fn test_terminal_error_types() {
        assert!(ErrorType::HttpTimeoutError.is_terminal());
        assert!(ErrorType::InvalidUrl.is_terminal());
        assert!(!ErrorType::JsonLdParseError.is_terminal());
        assert!(!ErrorType::NoStructuredData.is_terminal());
    }
}
