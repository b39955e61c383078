//! Records produced by the extraction engine.
//!
//! Every type here is created once per call and never mutated after the
//! orchestrator hands it back. Field names serialize in camelCase, matching the
//! JSON report the CLI writes.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};

use crate::error_handling::ExtractionError;

/// One prepared input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// The trimmed input as given
    pub input: String,
    /// Canonical absolute http(s) URL, or `None` if the input was rejected
    pub url: Option<String>,
}

/// A flattened JSON-LD node: any JSON object found in a script block.
pub type JsonLdNode = serde_json::Map<String, serde_json::Value>;

/// A Microdata item.
///
/// `properties` keeps names in order of first appearance and values in
/// discovery order. Repeated names accumulate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MicrodataItem {
    /// Whitespace-split `itemtype` tokens
    pub itemtype: Vec<String>,
    /// `itemid` verbatim, empty if absent
    pub itemid: String,
    /// Property name to values
    pub properties: IndexMap<String, Vec<MicrodataValue>>,
}

/// A Microdata property value: either text or a nested item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MicrodataValue {
    /// Scalar value read from the element (attribute or text)
    Text(String),
    /// Nested item (`itemscope` together with `itemprop`)
    Item(MicrodataItem),
}

impl MicrodataValue {
    /// Returns the scalar text, if this is not a nested item.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MicrodataValue::Text(s) => Some(s),
            MicrodataValue::Item(_) => None,
        }
    }

    /// Returns the nested item, if this is one.
    pub fn as_item(&self) -> Option<&MicrodataItem> {
        match self {
            MicrodataValue::Item(item) => Some(item),
            MicrodataValue::Text(_) => None,
        }
    }
}

/// One element carrying RDFa `property` and/or `typeof` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RdfaEntry {
    /// `about`, `resource`, `href`, `src` or `#id`, first present wins
    pub subject: String,
    /// Whitespace-split `typeof` tokens
    #[serde(rename = "typeof")]
    pub type_of: Vec<String>,
    /// `vocab` verbatim, empty if absent
    pub vocab: String,
    /// `prefix` verbatim, empty if absent
    pub prefix: String,
    /// Property name to values
    pub properties: IndexMap<String, Vec<String>>,
}

/// Extraction summary for a single URL.
///
/// `ok == false` means the URL was rejected or could not be fetched; `errors`
/// then holds exactly that failure and every extraction list is empty. An `ok`
/// result may still carry advisory errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Canonical URL, or the raw input when it was rejected
    pub url: String,
    /// Whether the page was fetched
    pub ok: bool,
    /// Page title with whitespace collapsed
    pub title: String,
    /// Flattened JSON-LD nodes
    pub nodes: Vec<JsonLdNode>,
    /// Top-level Microdata items
    pub microdata: Vec<MicrodataItem>,
    /// RDFa entries in document order
    pub rdfa: Vec<RdfaEntry>,
    /// JSON-LD `@type` tallies in order of first appearance
    pub type_counts: IndexMap<String, usize>,
    /// First non-empty `name`, `headline`, `description` or `url` of the
    /// first JSON-LD node
    pub sample_field: String,
    /// Terminal failure or advisory errors, serialized as messages
    #[serde(serialize_with = "serialize_errors")]
    pub errors: Vec<ExtractionError>,
    /// Wall-clock time spent on this URL
    pub elapsed_ms: u64,
}

impl ExtractionResult {
    /// Builds a failing result carrying a single error and no extracted data.
    pub fn failed(url: impl Into<String>, error: ExtractionError, elapsed_ms: u64) -> Self {
        Self {
            url: url.into(),
            ok: false,
            title: String::new(),
            nodes: Vec::new(),
            microdata: Vec::new(),
            rdfa: Vec::new(),
            type_counts: IndexMap::new(),
            sample_field: String::new(),
            errors: vec![error],
            elapsed_ms,
        }
    }

    /// Error messages as they appear in the report.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

fn serialize_errors<S>(errors: &[ExtractionError], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_seq(errors.iter().map(ToString::to_string))
}

/// The batch report returned by `run_report`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// RFC 3339 timestamp of when the batch finished
    pub generated_at: String,
    /// Number of results
    pub count: usize,
    /// One result per prepared URL, in input order
    pub results: Vec<ExtractionResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FetchError;

    #[test]
    fn test_failed_result_shape() {
        let result = ExtractionResult::failed(
            "https://example.com/",
            ExtractionError::Fetch(FetchError::Status(500)),
            42,
        );
        assert!(!result.ok);
        assert!(result.nodes.is_empty());
        assert!(result.microdata.is_empty());
        assert!(result.rdfa.is_empty());
        assert_eq!(result.error_messages(), vec!["HTTP 500".to_string()]);
        assert_eq!(result.elapsed_ms, 42);
    }

    #[test]
    fn test_result_serializes_camel_case_with_error_strings() {
        let result = ExtractionResult::failed("not a url", ExtractionError::InvalidUrl, 0);
        let json = serde_json::to_value(&result).expect("serializable");
        assert_eq!(json["url"], "not a url");
        assert_eq!(json["ok"], false);
        assert_eq!(json["errors"][0], "Invalid URL");
        assert!(json.get("typeCounts").is_some());
        assert!(json.get("sampleField").is_some());
        assert_eq!(json["elapsedMs"], 0);
    }

    #[test]
    fn test_microdata_value_serializes_untagged() {
        let mut nested = MicrodataItem {
            itemtype: vec!["Offer".into()],
            ..Default::default()
        };
        nested
            .properties
            .insert("price".into(), vec![MicrodataValue::Text("19.99".into())]);

        let mut item = MicrodataItem::default();
        item.properties.insert(
            "offers".into(),
            vec![
                MicrodataValue::Item(nested),
                MicrodataValue::Text("none".into()),
            ],
        );

        let json = serde_json::to_value(&item).expect("serializable");
        assert_eq!(json["properties"]["offers"][0]["itemtype"][0], "Offer");
        assert_eq!(json["properties"]["offers"][0]["properties"]["price"][0], "19.99");
        assert_eq!(json["properties"]["offers"][1], "none");
    }

    #[test]
    fn test_rdfa_entry_renames_typeof() {
        let entry = RdfaEntry {
            type_of: vec!["Person".into()],
            ..Default::default()
        };
        let json = serde_json::to_value(&entry).expect("serializable");
        assert_eq!(json["typeof"][0], "Person");
        assert!(json.get("type_of").is_none());
    }
}
