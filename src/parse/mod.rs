//! HTML parsing and structured data extraction.
//!
//! Three independent extractors read the same page:
//! - JSON-LD script blocks (from the raw markup)
//! - Microdata items (`itemscope`/`itemprop`/`itemref`)
//! - RDFa attributes (`property`/`typeof`)
//!
//! Element-tree parsing is done with the `scraper` crate. The document is
//! parsed once per page by the caller and shared by the tree-based extractors.

mod html;
mod jsonld;
mod microdata;
mod rdfa;

// Re-export public API
pub use html::extract_title;
pub use jsonld::{extract_json_ld, node_types, JsonLdExtraction};
pub use microdata::extract_microdata;
pub use rdfa::extract_rdfa;
