//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (limits, timeouts, client identity)
//! - Batch limits and library configuration
//! - CLI option types and parsing

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, Limits, LogFormat, LogLevel, Opt};
