//! Microdata extraction.
//!
//! Walks the element tree from every top-level `itemscope` element and builds
//! one `MicrodataItem` per item, resolving nested items and `itemref`
//! indirection.
//!
//! Each item is computed by its own recursive descent. An element may
//! contribute to several items (through `itemref` or because it is shared), so
//! there is no document-wide visited set; only the chain of items currently
//! being computed is tracked, to stop `itemref` cycles.
//!
//! Reference: <https://html.spec.whatwg.org/multipage/microdata.html>

use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use std::cell::Cell;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::error_handling::ExtractionError;
use crate::models::{MicrodataItem, MicrodataValue};
use crate::utils::parse_selector_with_fallback;

/// Maximum depth of nested items.
const MAX_ITEM_DEPTH: usize = 64;

/// Maximum number of items computed for one page, nested and referenced
/// copies included.
const MAX_ITEMS_PER_PAGE: usize = 10_000;

/// Maximum number of element visits for one page.
const MAX_ELEMENT_VISITS: usize = 1_000_000;

static ITEMSCOPE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("[itemscope]", "microdata extraction"));

static ID_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_with_fallback("[id]", "microdata extraction"));

/// Extracts all top-level Microdata items from a document.
///
/// Top-level items are `itemscope` elements that either carry no `itemprop`
/// or sit outside every other item scope.
///
/// # Errors
///
/// Returns `ExtractionError::MicrodataParse` when an `itemref` chain loops
/// back into an item that is still being computed, nesting exceeds
/// `MAX_ITEM_DEPTH`, or `itemref` fan-out pushes the page past
/// `MAX_ITEMS_PER_PAGE` items or `MAX_ELEMENT_VISITS` visits. No partial list
/// is returned in that case.
pub fn extract_microdata(document: &Html) -> Result<Vec<MicrodataItem>, ExtractionError> {
    let walker = ItemWalker::new(document);
    let mut items = Vec::new();

    for element in document.select(&ITEMSCOPE_SELECTOR) {
        if !is_top_level_item(element) {
            continue;
        }
        let mut chain = Vec::new();
        items.push(walker.item(element, &mut chain)?);
    }

    Ok(items)
}

fn is_top_level_item(element: ElementRef<'_>) -> bool {
    if element.value().attr("itemprop").is_none() {
        return true;
    }
    !element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|el| el.value().attr("itemscope").is_some())
}

struct ItemWalker<'a> {
    /// Elements by `id`, in document order (duplicate ids are all kept)
    ids: HashMap<&'a str, Vec<ElementRef<'a>>>,
    items_built: Cell<usize>,
    visits: Cell<usize>,
}

impl<'a> ItemWalker<'a> {
    fn new(document: &'a Html) -> Self {
        let mut ids: HashMap<&'a str, Vec<ElementRef<'a>>> = HashMap::new();
        for element in document.select(&ID_SELECTOR) {
            if let Some(id) = element.value().attr("id") {
                ids.entry(id).or_default().push(element);
            }
        }
        Self {
            ids,
            items_built: Cell::new(0),
            visits: Cell::new(0),
        }
    }

    /// Computes the item rooted at `element`.
    ///
    /// Scans the element's own children, then every element named by its
    /// `itemref` tokens (those elements are visited themselves, not just their
    /// children).
    fn item(
        &self,
        element: ElementRef<'a>,
        chain: &mut Vec<ElementRef<'a>>,
    ) -> Result<MicrodataItem, ExtractionError> {
        if chain.contains(&element) {
            return Err(ExtractionError::MicrodataParse(format!(
                "itemref cycle through <{}{}>",
                element.value().name(),
                describe_id(element)
            )));
        }
        if chain.len() >= MAX_ITEM_DEPTH {
            return Err(ExtractionError::MicrodataParse(format!(
                "items nested deeper than {MAX_ITEM_DEPTH} levels"
            )));
        }
        let built = self.items_built.get() + 1;
        if built > MAX_ITEMS_PER_PAGE {
            return Err(ExtractionError::MicrodataParse(format!(
                "too many items (more than {MAX_ITEMS_PER_PAGE})"
            )));
        }
        self.items_built.set(built);
        chain.push(element);

        let attrs = element.value();
        let mut item = MicrodataItem {
            itemtype: split_tokens(attrs.attr("itemtype")),
            itemid: attrs.attr("itemid").unwrap_or_default().to_string(),
            properties: IndexMap::new(),
        };

        self.scan(element.children().filter_map(ElementRef::wrap), &mut item, chain)?;

        for token in split_tokens(attrs.attr("itemref")) {
            if let Some(referenced) = self.ids.get(token.as_str()) {
                self.scan(referenced.iter().copied(), &mut item, chain)?;
            }
        }

        chain.pop();
        Ok(item)
    }

    /// Depth-first walk collecting properties for `item`.
    ///
    /// Uses an explicit stack so deep markup cannot exhaust the call stack;
    /// only nested items recurse.
    fn scan(
        &self,
        start: impl Iterator<Item = ElementRef<'a>>,
        item: &mut MicrodataItem,
        chain: &mut Vec<ElementRef<'a>>,
    ) -> Result<(), ExtractionError> {
        let mut stack: Vec<ElementRef<'a>> = start.collect();
        stack.reverse();

        while let Some(element) = stack.pop() {
            let visits = self.visits.get() + 1;
            if visits > MAX_ELEMENT_VISITS {
                return Err(ExtractionError::MicrodataParse(format!(
                    "too many element visits (more than {MAX_ELEMENT_VISITS})"
                )));
            }
            self.visits.set(visits);

            let attrs = element.value();
            let scoped = attrs.attr("itemscope").is_some();
            let names = split_tokens(attrs.attr("itemprop"));

            if scoped {
                // An unnamed scope is an unrelated item: nothing inside it
                // belongs to this one
                if !names.is_empty() {
                    let nested = self.item(element, chain)?;
                    push_values(item, names, MicrodataValue::Item(nested));
                }
                continue;
            }

            if !names.is_empty() {
                push_values(item, names, MicrodataValue::Text(scalar_value(element)));
            }

            let children_start = stack.len();
            stack.extend(element.children().filter_map(ElementRef::wrap));
            stack[children_start..].reverse();
        }

        Ok(())
    }
}

/// Appends `value` under every name, keeping first-appearance order of names.
fn push_values(item: &mut MicrodataItem, names: Vec<String>, value: MicrodataValue) {
    for name in names {
        item.properties.entry(name).or_default().push(value.clone());
    }
}

/// Computes the scalar value of an `itemprop` element from its tag.
fn scalar_value(element: ElementRef<'_>) -> String {
    let el = element.value();
    let attr = |name: &str| el.attr(name).unwrap_or_default().to_string();

    match el.name() {
        "meta" => attr("content"),
        "audio" | "video" | "track" | "source" | "img" | "iframe" | "embed" => attr("src"),
        "a" | "area" | "link" => attr("href"),
        "object" => attr("data"),
        "time" => el
            .attr("datetime")
            .map(str::to_string)
            .unwrap_or_else(|| text_content(element)),
        _ => text_content(element),
    }
}

pub(crate) fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Splits a space-separated attribute value into tokens.
pub(crate) fn split_tokens(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

fn describe_id(element: ElementRef<'_>) -> String {
    element
        .value()
        .attr("id")
        .map(|id| format!(" id=\"{id}\""))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(item: &'a MicrodataItem, name: &str) -> Vec<&'a str> {
        item.properties
            .get(name)
            .map(|values| values.iter().filter_map(MicrodataValue::as_text).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_simple_item() {
        let doc = Html::parse_document(
            r#"<div itemscope itemtype="Person"><span itemprop="name">Ada</span></div>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].itemtype, vec!["Person"]);
        assert_eq!(items[0].itemid, "");
        assert_eq!(texts(&items[0], "name"), vec!["Ada"]);
        assert_eq!(items[0].properties.len(), 1);
    }

    #[test]
    fn test_split_tokens() {
        assert_eq!(split_tokens(Some("  a  b\tc ")), vec!["a", "b", "c"]);
        assert!(split_tokens(Some("   ")).is_empty());
        assert!(split_tokens(None).is_empty());
    }

    #[test]
    fn test_scalar_values_by_tag() {
        let doc = Html::parse_document(
            r#"<div itemscope>
                <meta itemprop="m" content="meta-content">
                <img itemprop="i" src="/img.png">
                <a itemprop="l" href="/link">text</a>
                <object itemprop="o" data="/obj.swf"></object>
                <time itemprop="t" datetime="2024-01-01">New Year</time>
                <time itemprop="t">  Tomorrow  </time>
                <p itemprop="p">  Plain   text </p>
            </div>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        let item = &items[0];
        assert_eq!(texts(item, "m"), vec!["meta-content"]);
        assert_eq!(texts(item, "i"), vec!["/img.png"]);
        assert_eq!(texts(item, "l"), vec!["/link"]);
        assert_eq!(texts(item, "o"), vec!["/obj.swf"]);
        assert_eq!(texts(item, "t"), vec!["2024-01-01", "Tomorrow"]);
        assert_eq!(texts(item, "p"), vec!["Plain   text"]);
    }

    #[test]
    fn test_itemref_cycle_is_an_error() {
        let doc = Html::parse_document(
            r#"<div itemscope itemtype="A">
                <div id="b" itemprop="child" itemscope itemref="b"></div>
            </div>"#,
        );
        let err = extract_microdata(&doc).unwrap_err();
        assert!(matches!(err, ExtractionError::MicrodataParse(_)));
    }

    #[test]
    fn test_nested_item_is_a_value_not_flattened() {
        let doc = Html::parse_document(
            r#"<div itemscope itemtype="https://schema.org/Person">
                <span itemprop="name">Ada</span>
                <div itemprop="address" itemscope itemtype="https://schema.org/PostalAddress">
                    <span itemprop="addressLocality">London</span>
                </div>
            </div>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        assert_eq!(items.len(), 1);
        let person = &items[0];
        assert!(!person.properties.contains_key("addressLocality"));
        let address = person.properties["address"][0].as_item().unwrap();
        assert_eq!(address.itemtype, vec!["https://schema.org/PostalAddress"]);
        assert_eq!(texts(address, "addressLocality"), vec!["London"]);
    }

    #[test]
    fn test_itemref_reaches_outside_the_scope() {
        let doc = Html::parse_document(
            r#"<div itemscope itemtype="Product" itemref="price note"></div>
               <p id="price" itemprop="offers">9.99</p>
               <section id="note"><span itemprop="description">Shiny</span></section>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(texts(&items[0], "offers"), vec!["9.99"]);
        assert_eq!(texts(&items[0], "description"), vec!["Shiny"]);
    }

    #[test]
    fn test_missing_itemref_target_is_ignored() {
        let doc = Html::parse_document(
            r#"<div itemscope itemref="nowhere"><span itemprop="a">x</span></div>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        assert_eq!(texts(&items[0], "a"), vec!["x"]);
    }

    #[test]
    fn test_repeated_and_multi_name_itemprop() {
        let doc = Html::parse_document(
            r#"<div itemscope itemid="urn:1">
                <span itemprop="tag">a</span>
                <span itemprop="tag keyword">b</span>
            </div>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        assert_eq!(items[0].itemid, "urn:1");
        assert_eq!(texts(&items[0], "tag"), vec!["a", "b"]);
        assert_eq!(texts(&items[0], "keyword"), vec!["b"]);
        let names: Vec<&str> = items[0].properties.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["tag", "keyword"]);
    }

    #[test]
    fn test_unnamed_inner_scope_is_its_own_root() {
        let doc = Html::parse_document(
            r#"<div itemscope itemtype="Outer">
                <span itemprop="name">outer</span>
                <div itemscope itemtype="Inner">
                    <span itemprop="name">inner</span>
                </div>
            </div>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].itemtype, vec!["Outer"]);
        assert_eq!(texts(&items[0], "name"), vec!["outer"]);
        assert_eq!(items[1].itemtype, vec!["Inner"]);
        assert_eq!(texts(&items[1], "name"), vec!["inner"]);
    }

    #[test]
    fn test_shared_element_feeds_every_referring_item() {
        let doc = Html::parse_document(
            r#"<div itemscope itemtype="A" itemref="shared"></div>
               <div itemscope itemtype="B" itemref="shared"></div>
               <span id="shared" itemprop="brand">Acme</span>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(texts(&items[0], "brand"), vec!["Acme"]);
        assert_eq!(texts(&items[1], "brand"), vec!["Acme"]);
    }

    #[test]
    fn test_itemref_fan_out_hits_item_budget() {
        // Every level references the next one twice, doubling the items
        let levels = 20;
        let mut html = String::from(r#"<div itemscope itemref="L0"></div>"#);
        for k in 0..levels {
            html.push_str(&format!(
                r#"<div id="L{k}"><div itemprop="a" itemscope itemref="L{next}"></div><div itemprop="b" itemscope itemref="L{next}"></div></div>"#,
                next = k + 1
            ));
        }
        let doc = Html::parse_document(&html);

        let start = std::time::Instant::now();
        let err = extract_microdata(&doc).unwrap_err();
        assert!(matches!(&err, ExtractionError::MicrodataParse(msg) if msg.contains("too many items")));
        assert!(start.elapsed() < std::time::Duration::from_secs(10));
    }

    #[test]
    fn test_wide_page_within_budget() {
        let mut html = String::new();
        for i in 0..500 {
            html.push_str(&format!(
                r#"<div itemscope itemtype="Thing"><span itemprop="n">{i}</span></div>"#
            ));
        }
        let items = extract_microdata(&Html::parse_document(&html)).unwrap();
        assert_eq!(items.len(), 500);
        assert_eq!(texts(&items[499], "n"), vec!["499"]);
    }

    #[test]
    fn test_itemref_target_subtree_keeps_nested_item_boundary() {
        let doc = Html::parse_document(
            r#"<div itemscope itemtype="Product" itemref="r"></div>
               <section id="r">
                   <div itemprop="offer" itemscope itemtype="Offer">
                       <span itemprop="price">1</span>
                   </div>
               </section>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        let product = &items[0];
        assert_eq!(product.itemtype, vec!["Product"]);
        assert!(!product.properties.contains_key("price"));
        let offer = product.properties["offer"][0]
            .as_item()
            .expect("offer is a nested item");
        assert_eq!(offer.itemtype, vec!["Offer"]);
        assert_eq!(texts(offer, "price"), vec!["1"]);
    }

    #[test]
    fn test_itemref_target_subtree_skips_unnamed_scope() {
        let doc = Html::parse_document(
            r#"<div itemscope itemtype="Product" itemref="r"></div>
               <section id="r">
                   <span itemprop="name">Widget</span>
                   <div itemscope itemtype="Review">
                       <span itemprop="rating">5</span>
                   </div>
               </section>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        let product = &items[0];
        assert_eq!(texts(product, "name"), vec!["Widget"]);
        assert!(!product.properties.contains_key("rating"));
        assert_eq!(product.properties.len(), 1);
        // The unnamed scope is reported as its own top-level item
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].itemtype, vec!["Review"]);
        assert_eq!(texts(&items[1], "rating"), vec!["5"]);
    }

    #[test]
    fn test_whitespace_itemprop_declares_nothing() {
        let doc = Html::parse_document(
            r#"<div itemscope><span itemprop="   ">x</span></div>"#,
        );
        let items = extract_microdata(&doc).unwrap();
        assert!(items[0].properties.is_empty());
    }
}
