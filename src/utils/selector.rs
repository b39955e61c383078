//! CSS selector parsing utilities.

use scraper::Selector;

/// Parses a CSS selector with a safe fallback.
///
/// If parsing fails, logs an error and returns a selector that matches nothing
/// (`*:not(*)`). Used for the static selectors the extractors compile once.
///
/// # Arguments
///
/// * `selector_str` - The CSS selector string to parse
/// * `context` - Context description for error logging (e.g., "RDFa extraction")
pub fn parse_selector_with_fallback(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' in {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        match Selector::parse("*:not(*)") {
            Ok(selector) => selector,
            Err(_) => unreachable!("'*:not(*)' is a valid selector"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_valid_selector_matches() {
        let selector = parse_selector_with_fallback("[itemscope]", "test");
        let doc = Html::parse_fragment(r#"<div itemscope></div>"#);
        assert_eq!(doc.select(&selector).count(), 1);
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let selector = parse_selector_with_fallback("[[[", "test");
        let doc = Html::parse_fragment(r#"<div itemscope><span></span></div>"#);
        assert_eq!(doc.select(&selector).count(), 0);
    }
}
