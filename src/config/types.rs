//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and library configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_CONCURRENCY, DEFAULT_MAX_URLS, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Batch limits threaded explicitly through every engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of URLs kept by the preparer
    pub max_urls: usize,
    /// Number of concurrent workers
    pub concurrency: usize,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_urls: DEFAULT_MAX_URLS,
            concurrency: DEFAULT_CONCURRENCY,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use structured_data_report::{Config, Limits};
///
/// let config = Config {
///     limits: Limits {
///         concurrency: 10,
///         ..Default::default()
///     },
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Batch limits (URL cap, worker count, per-request timeout)
    pub limits: Limits,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// Command-line options.
///
/// # Examples
///
/// ```bash
/// # Read URLs from a file, print the report to stdout
/// structured_data_report urls.txt
///
/// # Read from stdin, more workers, shorter timeout
/// cat urls.txt | structured_data_report - --concurrency 10 --timeout-ms 5000
///
/// # Write the report to a file
/// structured_data_report urls.txt --output report.json --pretty
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "structured_data_report",
    about = "Extracts JSON-LD, Microdata and RDFa from a list of URLs."
)]
pub struct Opt {
    /// File to read URLs from, one per line (use - for stdin)
    #[arg(value_parser)]
    pub file: PathBuf,

    /// Write the JSON report here instead of stdout
    #[arg(long, short = 'o', value_parser)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,

    /// Maximum number of URLs processed (extra lines are ignored)
    #[arg(long, default_value_t = DEFAULT_MAX_URLS)]
    pub max_urls: usize,

    /// Number of concurrent workers
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        Self {
            limits: Limits {
                max_urls: opt.max_urls,
                concurrency: opt.concurrency,
                timeout_ms: opt.timeout_ms,
            },
            user_agent: opt.user_agent,
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_limits_default_values() {
        let limits = Limits::default();
        assert_eq!(limits.max_urls, 200);
        assert_eq!(limits.concurrency, 5);
        assert_eq!(limits.timeout_ms, 12_000);
    }

    #[test]
    fn test_config_default_uses_bot_user_agent() {
        let config = Config::default();
        assert_eq!(config.user_agent, "StructuredDataReportBot/1.0");
        assert_eq!(config.limits, Limits::default());
    }

    #[test]
    fn test_opt_into_config() {
        let opt = Opt::try_parse_from([
            "structured_data_report",
            "urls.txt",
            "--max-urls",
            "10",
            "--concurrency",
            "2",
            "--timeout-ms",
            "500",
        ])
        .expect("options should parse");
        let config = Config::from(opt);
        assert_eq!(
            config.limits,
            Limits {
                max_urls: 10,
                concurrency: 2,
                timeout_ms: 500,
            }
        );
    }

    #[test]
    fn test_log_format_debug() {
        assert_eq!(format!("{:?}", LogFormat::Plain), "Plain");
        assert_eq!(format!("{:?}", LogFormat::Json), "Json");
    }
}
