//! Attribute Normalizer
//!
//! Idempotent attribute stripping, table class injection and stray script
//! removal. Every transform is a no-op on a document with nothing to match.

use crate::dom::node::{add_class, attr, detach, find_ancestor, is_tag, remove_attr, tag_name};
use crate::dom::Document;

const TEXT_FLOW_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "ul", "ol", "li", "dl", "dt", "dd",
];
const TEXT_FLOW_ATTRS: &[&str] = &["width", "style"];

const CONTAINER_TAGS: &[&str] = &["body", "div", "span", "bold", "em"];
const CONTAINER_ATTRS: &[&str] = &["style"];

const TABLE_TAGS: &[&str] = &["table", "thead", "tbody", "tfoot", "tr", "th", "td"];
const TABLE_ATTRS: &[&str] = &["cellspacing", "cellpadding", "width", "style"];

/// Counts of what a normalization run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeReport {
    pub attributes_removed: usize,
    pub classes_added: usize,
    pub scripts_removed: usize,
}

impl AttributeReport {
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

/// Strip `attrs` from every element whose tag is in `tags`
pub fn strip_attributes(doc: &Document, tags: &[&str], attrs: &[&str]) -> usize {
    let mut removed = 0;
    for element in doc.elements() {
        let matches = tag_name(&element).map(|t| tags.contains(&t)).unwrap_or(false);
        if !matches {
            continue;
        }
        for name in attrs {
            if remove_attr(&element, name) {
                removed += 1;
            }
        }
    }
    removed
}

/// Strip attribute `name` wherever its value is one of `values`
pub fn strip_attribute_values(doc: &Document, name: &str, values: &[&str]) -> usize {
    let mut removed = 0;
    for element in doc.elements() {
        let matches = attr(&element, name)
            .map(|value| values.contains(&value.as_str()))
            .unwrap_or(false);
        if matches && remove_attr(&element, name) {
            removed += 1;
        }
    }
    removed
}

pub fn strip_text_flow_attributes(doc: &Document) -> usize {
    strip_attributes(doc, TEXT_FLOW_TAGS, TEXT_FLOW_ATTRS)
}

pub fn strip_container_styles(doc: &Document) -> usize {
    strip_attributes(doc, CONTAINER_TAGS, CONTAINER_ATTRS)
}

pub fn strip_table_attributes(doc: &Document) -> usize {
    strip_attributes(doc, TABLE_TAGS, TABLE_ATTRS)
}

/// `target="_self"` and `target="_new"`
pub fn strip_redundant_targets(doc: &Document) -> usize {
    strip_attribute_values(doc, "target", &["_self", "_new"])
}

/// `role="presentation"`
pub fn strip_presentation_roles(doc: &Document) -> usize {
    strip_attribute_values(doc, "role", &["presentation"])
}

/// Add `class` to every table that lacks it
pub fn add_table_class(doc: &Document, class: &str) -> usize {
    doc.elements_by_tag("table")
        .iter()
        .filter(|table| add_class(table, class))
        .count()
}

/// Remove every `script` that is not inside `head`
pub fn remove_body_scripts(doc: &Document) -> usize {
    let stray: Vec<_> = doc
        .elements_by_tag("script")
        .into_iter()
        .filter(|script| find_ancestor(script, |a| is_tag(a, "head")).is_none())
        .collect();
    for script in &stray {
        detach(script);
    }
    stray.len()
}

/// Run every attribute transform. `table_class` is injected only when given.
pub fn normalize_attributes(doc: &Document, table_class: Option<&str>) -> AttributeReport {
    let mut report = AttributeReport {
        attributes_removed: strip_text_flow_attributes(doc)
            + strip_container_styles(doc)
            + strip_table_attributes(doc)
            + strip_redundant_targets(doc)
            + strip_presentation_roles(doc),
        ..Default::default()
    };
    if let Some(class) = table_class {
        report.classes_added = add_table_class(doc, class);
    }
    report.scripts_removed = remove_body_scripts(doc);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::node::has_attr;
    use crate::dom::parse;

    #[test]
    fn test_text_flow_attributes() {
        let doc = parse(
            r#"<p style="color:red" width="10" class="lead">x</p><section style="a">y</section>"#,
        );
        assert_eq!(strip_text_flow_attributes(&doc), 2);
        let p = doc.find_first("p").unwrap();
        assert!(!has_attr(&p, "style"));
        assert!(has_attr(&p, "class"));
        assert!(has_attr(&doc.find_first("section").unwrap(), "style"));
    }

    #[test]
    fn test_container_styles_keep_width() {
        let doc = parse(r#"<div style="x" width="3"><span style="y">z</span></div>"#);
        assert_eq!(strip_container_styles(&doc), 2);
        assert!(has_attr(&doc.find_first("div").unwrap(), "width"));
    }

    #[test]
    fn test_table_attributes() {
        let doc = parse(
            concat!(
                r#"<table cellspacing="0" cellpadding="2" width="100%">"#,
                r#"<tr><td style="a" width="5">x</td></tr></table>"#,
            ),
        );
        assert_eq!(strip_table_attributes(&doc), 5);
    }

    #[test]
    fn test_target_and_role_values() {
        let doc = parse(
            concat!(
                r#"<a target="_self">a</a><a target="_new">b</a><a target="_blank">c</a>"#,
                r#"<table role="presentation"></table><div role="main"></div>"#,
            ),
        );
        assert_eq!(strip_redundant_targets(&doc), 2);
        assert_eq!(strip_presentation_roles(&doc), 1);
        let anchors = doc.elements_by_tag("a");
        assert_eq!(attr(&anchors[2], "target").as_deref(), Some("_blank"));
        assert_eq!(attr(&doc.find_first("div").unwrap(), "role").as_deref(), Some("main"));
    }

    #[test]
    fn test_scripts_outside_head_removed() {
        let doc = parse(
            concat!(
                r#"<head><script src="keep.js"></script></head>"#,
                r#"<body><p>x</p><script>alert(1)</script>"#,
                r#"<div><script src="y.js"></script></div></body>"#,
            ),
        );
        assert_eq!(remove_body_scripts(&doc), 2);
        let scripts = doc.elements_by_tag("script");
        assert_eq!(scripts.len(), 1);
        assert_eq!(attr(&scripts[0], "src").as_deref(), Some("keep.js"));
    }

    #[test]
    fn test_normalize_twice_is_stable() {
        let doc = parse(
            concat!(
                r#"<html><body style="x"><table width="1"><tr><td>a</td></tr></table>"#,
                r#"<a target="_new">l</a><script>s()</script></body></html>"#,
            ),
        );
        let first = normalize_attributes(&doc, Some("display-lg"));
        assert!(!first.is_unchanged());
        let once = doc.to_html();

        let second = normalize_attributes(&doc, Some("display-lg"));
        assert!(second.is_unchanged());
        assert_eq!(doc.to_html(), once);
    }

    #[test]
    fn test_no_matches_is_fine() {
        let doc = parse("");
        assert!(normalize_attributes(&doc, Some("display-lg")).is_unchanged());
    }
}
