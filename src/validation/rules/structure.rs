//! Page Structure Rules
//!
//! Doctype and language, the page chrome, `.content-body` placement and
//! deprecated layout markers.

use crate::dom::node::{attr, descendant_elements, find_ancestor, has_class, has_id, is_tag};
use crate::dom::Document;
use crate::profile::RuleSettings;
use crate::validation::engine::{Rule, ValidationResult};

pub const MISSING_DOCTYPE: &str = "Missing <!DOCTYPE html>";
pub const MISSING_HTML_LANG: &str = "Missing <html lang='en'>";
pub const MISSING_HEADER: &str = "Missing <header class='header'>";
pub const MISSING_CONTENT_WRAPPER: &str = "Missing '#content-wrapper'";
pub const NESTED_CONTENT_BODY: &str =
    "An invalid '.content-body' (nested within another '.content-body')";
pub const MISPLACED_CONTENT_BODY: &str =
    "A 'content-body' is not inside #content-wrapper, #second-column, or #third-column";
pub const DEPRECATED_MARKER_PREFIX: &str = "Contains deprecated class or id";

const CONTENT_WRAPPER_ID: &str = "content-wrapper";
const CONTENT_BODY_CLASS: &str = "content-body";

/// `<!DOCTYPE html>` and `<html lang="en">`, reported independently
pub struct DoctypeLang;

impl Rule for DoctypeLang {
    fn name(&self) -> &'static str {
        "doctype-lang"
    }

    fn check(&self, doc: &Document, _settings: &RuleSettings, result: &mut ValidationResult) {
        let has_html_doctype = doc
            .doctype_name()
            .map(|name| name.eq_ignore_ascii_case("html"))
            .unwrap_or(false);
        if !has_html_doctype {
            result.add(MISSING_DOCTYPE);
        }

        let lang = doc.find_first("html").and_then(|html| attr(&html, "lang"));
        if lang.as_deref() != Some("en") {
            result.add(MISSING_HTML_LANG);
        }
    }
}

/// `header.header` and `div#content-wrapper`, reported independently
pub struct HeaderContentWrapper;

impl Rule for HeaderContentWrapper {
    fn name(&self) -> &'static str {
        "header-content-wrapper"
    }

    fn check(&self, doc: &Document, _settings: &RuleSettings, result: &mut ValidationResult) {
        let header = doc.find_first_matching(|e| is_tag(e, "header") && has_class(e, "header"));
        if header.is_none() {
            result.add(MISSING_HEADER);
        }

        let wrapper =
            doc.find_first_matching(|e| is_tag(e, "div") && has_id(e, CONTENT_WRAPPER_ID));
        if wrapper.is_none() {
            result.add(MISSING_CONTENT_WRAPPER);
        }
    }
}

/// Every `.content-body` must not contain another one, and must sit under
/// one of the designated container `div`s
pub struct ContentBodyPlacement;

impl Rule for ContentBodyPlacement {
    fn name(&self) -> &'static str {
        "content-body"
    }

    fn check(&self, doc: &Document, settings: &RuleSettings, result: &mut ValidationResult) {
        let bodies = doc
            .elements()
            .into_iter()
            .filter(|e| has_class(e, CONTENT_BODY_CLASS));

        for body in bodies {
            let nested = descendant_elements(&body)
                .iter()
                .any(|d| has_class(d, CONTENT_BODY_CLASS));
            if nested {
                result.add(NESTED_CONTENT_BODY);
            }

            let container = find_ancestor(&body, |ancestor| {
                is_tag(ancestor, "div")
                    && settings
                        .content_containers
                        .iter()
                        .any(|id| has_id(ancestor, id))
            });
            if container.is_none() {
                result.add(MISPLACED_CONTENT_BODY);
            }
        }
    }
}

/// One finding per deny-listed name used as a class or id anywhere
pub struct DeprecatedMarkers;

impl Rule for DeprecatedMarkers {
    fn name(&self) -> &'static str {
        "deprecated-markers"
    }

    fn check(&self, doc: &Document, settings: &RuleSettings, result: &mut ValidationResult) {
        let elements = doc.elements();
        for marker in &settings.deprecated_markers {
            if elements.iter().any(|e| has_class(e, marker) || has_id(e, marker)) {
                result.add(deprecated_marker_message(marker));
            }
        }
    }
}

pub fn deprecated_marker_message(marker: &str) -> String {
    format!("{} ({})", DEPRECATED_MARKER_PREFIX, marker)
}
