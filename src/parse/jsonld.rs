//! JSON-LD extraction.
//!
//! Scans the raw markup for `<script type="application/ld+json">` blocks,
//! decodes each one and flattens arrays and `@graph` containers into a list of
//! nodes in document order.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

use crate::error_handling::ExtractionError;
use crate::models::JsonLdNode;

// Single pattern for both quote styles so blocks come out in document order
static JSONLD_SCRIPT_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    match Regex::new(
        r#"(?is)<script\b[^>]*\btype\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script\s*>"#,
    ) {
        Ok(re) => Some(re),
        Err(e) => {
            log::error!("Failed to compile JSON-LD script pattern: {}", e);
            None
        }
    }
});

/// JSON-LD nodes found on a page plus one advisory error per bad block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonLdExtraction {
    /// Nodes in document order
    pub nodes: Vec<JsonLdNode>,
    /// One `JsonLdParse` per block that failed to decode
    pub errors: Vec<ExtractionError>,
}

/// Extracts JSON-LD nodes from raw HTML.
///
/// A block that fails to decode adds a `JsonLdParse` error and is skipped;
/// the remaining blocks are still processed.
pub fn extract_json_ld(html: &str) -> JsonLdExtraction {
    let mut extraction = JsonLdExtraction::default();

    let Some(re) = JSONLD_SCRIPT_RE.as_ref() else {
        return extraction;
    };

    for cap in re.captures_iter(html) {
        let Some(content) = cap.get(1) else {
            continue;
        };
        let cleaned = strip_comment_wrapper(content.as_str());
        match serde_json::from_str::<Value>(cleaned) {
            Ok(value) => flatten_into(value, &mut extraction.nodes),
            Err(e) => {
                log::debug!("Skipping malformed JSON-LD block: {}", e);
                extraction.errors.push(ExtractionError::JsonLdParse);
            }
        }
    }

    extraction
}

/// Removes a leading `<!--` and trailing `-->` around a script body.
fn strip_comment_wrapper(raw: &str) -> &str {
    let mut s = raw.trim_start();
    if let Some(rest) = s.strip_prefix("<!--") {
        s = rest;
    }
    let mut s = s.trim_end();
    if let Some(rest) = s.strip_suffix("-->") {
        s = rest;
    }
    s.trim()
}

/// Flattens a decoded block: arrays into their members, `@graph` containers
/// into their graph, objects into one node. Scalars are dropped.
fn flatten_into(value: Value, nodes: &mut Vec<JsonLdNode>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten_into(item, nodes);
            }
        }
        Value::Object(mut obj) => {
            if obj.get("@graph").is_some_and(|g| !g.is_null()) {
                if let Some(graph) = obj.remove("@graph") {
                    flatten_into(graph, nodes);
                }
            } else {
                nodes.push(obj);
            }
        }
        _ => {}
    }
}

/// Returns the `@type` values of a node (a string or a list of strings).
pub fn node_types(node: &JsonLdNode) -> Vec<&str> {
    match node.get("@type") {
        Some(Value::String(s)) => vec![s.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}
