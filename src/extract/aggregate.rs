//! Result aggregation for a fetched page.

use std::panic::{catch_unwind, AssertUnwindSafe};

use indexmap::IndexMap;
use log::debug;
use scraper::Html;
use serde_json::Value;

use crate::error_handling::ExtractionError;
use crate::models::{ExtractionResult, JsonLdNode};
use crate::parse::{extract_json_ld, extract_microdata, extract_rdfa, extract_title, node_types};

/// Fields consulted, in order, for a node's sample value.
const SAMPLE_FIELDS: [&str; 4] = ["name", "headline", "description", "url"];

/// Builds an `ok` result from fetched markup.
///
/// Each format is extracted independently. A failing format contributes one
/// advisory error and an empty list; the others are unaffected. `elapsed_ms`
/// is left at zero for the caller to fill in.
pub fn build_result(url: &str, html: &str) -> ExtractionResult {
    let mut errors = Vec::new();

    let json_ld = extract_json_ld(html);
    errors.extend(json_ld.errors);

    let document = Html::parse_document(html);
    let title = extract_title(&document);

    let microdata = match isolate(|| extract_microdata(&document)) {
        Ok(Ok(items)) => items,
        Ok(Err(e)) => {
            debug!("Microdata extraction failed for {}: {}", url, e);
            errors.push(e);
            Vec::new()
        }
        Err(message) => {
            debug!("Microdata extraction panicked for {}: {}", url, message);
            errors.push(ExtractionError::MicrodataParse(message));
            Vec::new()
        }
    };

    let rdfa = match isolate(|| extract_rdfa(&document)) {
        Ok(entries) => entries,
        Err(message) => {
            debug!("RDFa extraction panicked for {}: {}", url, message);
            errors.push(ExtractionError::RdfaParse(message));
            Vec::new()
        }
    };

    let nodes = json_ld.nodes;
    if nodes.is_empty() && microdata.is_empty() && rdfa.is_empty() {
        errors.push(ExtractionError::NoStructuredData);
    }

    ExtractionResult {
        url: url.to_string(),
        ok: true,
        title,
        type_counts: type_counts(&nodes),
        sample_field: sample_field(&nodes),
        nodes,
        microdata,
        rdfa,
        errors,
        elapsed_ms: 0,
    }
}

/// Runs one tree extractor, turning a panic into a message.
fn isolate<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unexpected panic".to_string())
    })
}

/// Tallies JSON-LD `@type` values in order of first appearance.
fn type_counts(nodes: &[JsonLdNode]) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for node in nodes {
        for type_name in node_types(node) {
            *counts.entry(type_name.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// First non-empty string among the first node's sample fields.
fn sample_field(nodes: &[JsonLdNode]) -> String {
    let Some(first) = nodes.first() else {
        return String::new();
    };
    SAMPLE_FIELDS
        .iter()
        .filter_map(|field| first.get(*field).and_then(Value::as_str))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}
