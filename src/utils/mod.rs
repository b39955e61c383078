//! Utility functions.
//!
//! This module provides:
//! - CSS selector parsing with a safe fallback
//! - Elapsed-time conversion

mod selector;

use std::time::Duration;

pub use selector::parse_selector_with_fallback;

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
pub fn duration_to_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_to_ms() {
        assert_eq!(duration_to_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(duration_to_ms(Duration::from_micros(999)), 0);
    }
}
