//! Heading Rules

use crate::dom::node::{tag_name, text_content};
use crate::dom::Document;
use crate::profile::RuleSettings;
use crate::validation::engine::{Rule, ValidationResult};

pub const TITLE_H1_MISMATCH: &str = "<title> and <h1> do not match";
pub const MISSING_TITLE_OR_H1: &str = "Missing <title> or <h1> element";

/// Level of an `h1`..`h6` tag
pub fn heading_level(tag: &str) -> Option<u8> {
    match tag.as_bytes() {
        [b'h', digit @ b'1'..=b'6'] => Some(digit - b'0'),
        _ => None,
    }
}

/// Trimmed text of the first `title` and first `h1` must be identical
pub struct TitleMatchesH1;

impl Rule for TitleMatchesH1 {
    fn name(&self) -> &'static str {
        "title-h1"
    }

    fn check(&self, doc: &Document, _settings: &RuleSettings, result: &mut ValidationResult) {
        match (doc.find_first("title"), doc.find_first("h1")) {
            (Some(title), Some(h1)) => {
                if text_content(&title).trim() != text_content(&h1).trim() {
                    result.add(TITLE_H1_MISMATCH);
                }
            }
            _ => result.add(MISSING_TITLE_OR_H1),
        }
    }
}

/// Headings may go up any number of levels but down only one at a time.
///
/// An out-of-order heading does not move the current level, so later
/// headings are judged against the last accepted one.
pub struct HeadingOrder;

impl Rule for HeadingOrder {
    fn name(&self) -> &'static str {
        "heading-order"
    }

    fn check(&self, doc: &Document, _settings: &RuleSettings, result: &mut ValidationResult) {
        let mut current_level = 1u8;
        for heading in doc.elements() {
            let Some(level) = tag_name(&heading).and_then(heading_level) else {
                continue;
            };
            if level > current_level + 1 {
                result.add(format!(
                    "Heading out of order (h{} found after h{})",
                    level, current_level
                ));
            } else {
                current_level = level;
            }
        }
    }
}
