//! Document Normalization
//!
//! Attribute cleanup followed by fixed-point pruning. The two historical
//! cleaning variants are one configurable pass: the candidate tag set and
//! table class injection are options.

pub mod attributes;
pub mod pruner;

use std::collections::BTreeSet;

use crate::dom::Document;
use crate::profile::schema::DEFAULT_TABLE_DISPLAY_CLASS;
use crate::profile::CleaningSettings;

pub use attributes::{normalize_attributes, AttributeReport};
pub use pruner::{FixedPointPruner, PruneReport};

/// Options for one normalization run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanOptions {
    pub prunable_tags: BTreeSet<String>,
    pub inject_table_display_class: bool,
    pub table_display_class: String,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self::from_settings(&CleaningSettings::default(), DEFAULT_TABLE_DISPLAY_CLASS)
    }
}

impl CleanOptions {
    pub fn from_settings(settings: &CleaningSettings, table_display_class: &str) -> Self {
        Self {
            prunable_tags: settings
                .prunable_tags
                .iter()
                .map(|t| t.to_ascii_lowercase())
                .collect(),
            inject_table_display_class: settings.inject_table_display_class,
            table_display_class: table_display_class.to_string(),
        }
    }

    /// Text-only pruning without table class injection
    pub fn conservative() -> Self {
        Self::from_settings(&CleaningSettings::conservative(), DEFAULT_TABLE_DISPLAY_CLASS)
    }
}

/// What a normalization run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub attributes: AttributeReport,
    pub pruning: PruneReport,
}

/// Normalize `doc` in place: attributes first so that removed scripts can
/// leave prunable empties behind, then pruning to a fixed point
pub fn normalize_document(doc: &Document, options: &CleanOptions) -> NormalizeReport {
    let table_class = options
        .inject_table_display_class
        .then_some(options.table_display_class.as_str());
    let attributes = normalize_attributes(doc, table_class);
    let pruning = FixedPointPruner::new(options.prunable_tags.iter().cloned()).prune(doc);
    NormalizeReport { attributes, pruning }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    #[test]
    fn test_script_only_paragraph_is_pruned() {
        let doc = parse("<body><p><script>track()</script></p><p>kept</p></body>");
        let report = normalize_document(&doc, &CleanOptions::default());
        assert_eq!(report.attributes.scripts_removed, 1);
        assert_eq!(report.pruning.removed, 1);
        assert_eq!(doc.elements_by_tag("p").len(), 1);
    }

    #[test]
    fn test_conservative_skips_tables_and_divs() {
        let doc = parse("<body><div></div><table><tr><td>x</td></tr></table></body>");
        normalize_document(&doc, &CleanOptions::conservative());
        assert!(doc.find_first("div").is_some());
        let table = doc.find_first("table").unwrap();
        assert!(!crate::dom::node::has_class(&table, "display-lg"));

        normalize_document(&doc, &CleanOptions::default());
        assert!(doc.find_first("div").is_none());
        let table = doc.find_first("table").unwrap();
        assert!(crate::dom::node::has_class(&table, "display-lg"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let doc = parse(
            concat!(
                r#"<!DOCTYPE html><html lang="en"><body style="margin:0">"#,
                r#"<div><p style="x"><span>&nbsp;</span></p></div>"#,
                r#"<p><iframe src="https://x.test/v"></iframe></p>"#,
                r#"<table width="3"><tr><td role="presentation">a</td></tr></table>"#,
                "</body></html>",
            ),
        );
        normalize_document(&doc, &CleanOptions::default());
        let once = doc.to_html();
        let again = normalize_document(&doc, &CleanOptions::default());
        assert!(again.attributes.is_unchanged());
        assert!(!again.pruning.changed());
        assert_eq!(doc.to_html(), once);
    }
}
