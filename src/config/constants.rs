//! Configuration constants.
//!
//! This module defines the default limits and the fixed client identity used
//! for every outbound request.

/// Maximum number of URLs accepted per batch.
///
/// Entries beyond this cap are dropped by the preparer without being reported.
pub const DEFAULT_MAX_URLS: usize = 200;

/// Number of concurrent workers processing a batch.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// Per-request timeout in milliseconds.
///
/// Applies to a single fetch only. There is no batch-level timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 12_000;

/// Identifying User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "StructuredDataReportBot/1.0";

/// Accept header value. Only HTML-ish content is requested.
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml";

/// Error recorded for an input that is not an absolute http(s) URL.
pub const MSG_INVALID_URL: &str = "Invalid URL";
/// Advisory recorded once per JSON-LD block that fails to decode.
pub const MSG_JSONLD_PARSE_FAILURE: &str = "JSON-LD block parse failure";
/// Advisory recorded when no format yields anything.
pub const MSG_NO_STRUCTURED_DATA: &str = "No structured data found";
/// Batch error when no URL survives preparation.
pub const MSG_NO_URLS: &str = "No URLs provided";

/// Progress is logged every this many completed URLs (and once at the end).
pub const PROGRESS_LOG_INTERVAL: usize = 10;
