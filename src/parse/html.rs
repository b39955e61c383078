//! Basic HTML extraction utilities.

use scraper::{Html, Selector};
use std::sync::LazyLock;

use crate::utils::parse_selector_with_fallback;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("title", "title extraction"));

/// Extracts the page title from an HTML document.
///
/// Returns the text of the first `<title>` element with whitespace runs
/// collapsed to single spaces, or an empty string if there is none.
pub fn extract_title(document: &Html) -> String {
    match document.select(&TITLE_SELECTOR).next() {
        Some(element) => collapse_whitespace(&element.text().collect::<String>()),
        None => {
            log::debug!("No <title> element found");
            String::new()
        }
    }
}

/// Collapses every run of whitespace into a single space and trims the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
