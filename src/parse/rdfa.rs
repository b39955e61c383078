//! RDFa extraction.
//!
//! Flat, per-element reading of RDFa attributes. Subjects are not chained
//! across elements and CURIEs are not expanded: every element carrying
//! `property` or `typeof` becomes one entry with its own attributes.

use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use crate::models::RdfaEntry;
use crate::parse::microdata::{split_tokens, text_content};
use crate::utils::parse_selector_with_fallback;

static RDFA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("[property], [typeof]", "RDFa extraction"));

/// Extracts one `RdfaEntry` per element carrying `property` or `typeof`, in
/// document order.
///
/// Elements whose attributes are present but contain only whitespace yield no
/// entry.
pub fn extract_rdfa(document: &Html) -> Vec<RdfaEntry> {
    document
        .select(&RDFA_SELECTOR)
        .filter_map(read_entry)
        .collect()
}

fn read_entry(element: ElementRef<'_>) -> Option<RdfaEntry> {
    let el = element.value();
    let type_of = split_tokens(el.attr("typeof"));
    let names = split_tokens(el.attr("property"));

    if type_of.is_empty() && names.is_empty() {
        return None;
    }

    let mut properties: IndexMap<String, Vec<String>> = IndexMap::new();
    if !names.is_empty() {
        let value = property_value(element);
        for name in names {
            properties.entry(name).or_default().push(value.clone());
        }
    }

    Some(RdfaEntry {
        subject: subject(element),
        type_of,
        vocab: el.attr("vocab").unwrap_or_default().to_string(),
        prefix: el.attr("prefix").unwrap_or_default().to_string(),
        properties,
    })
}

/// Subject precedence: `about`, `resource`, `href`, `src`, then `#id`.
fn subject(element: ElementRef<'_>) -> String {
    let el = element.value();
    ["about", "resource", "href", "src"]
        .iter()
        .find_map(|name| el.attr(name))
        .map(str::to_string)
        .or_else(|| el.attr("id").map(|id| format!("#{id}")))
        .unwrap_or_default()
}

/// Value precedence: `content`, `resource`, `href`, `src`, then trimmed text.
fn property_value(element: ElementRef<'_>) -> String {
    let el = element.value();
    ["content", "resource", "href", "src"]
        .iter()
        .find_map(|name| el.attr(name))
        .map(str::to_string)
        .unwrap_or_else(|| text_content(element))
}
