//! Document Model
//!
//! Thin wrapper over an html5ever `RcDom`. Children are owned through `Rc`,
//! parents are reachable through a `Weak` back-reference used only for
//! upward traversal.

pub mod node;

use html5ever::serialize::TraversalScope;
use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

pub use markup5ever_rcdom::Handle as NodeHandle;

/// A parsed HTML document
pub struct Document {
    dom: RcDom,
}

/// Parse markup into a document. Never fails: missing closing tags, unknown
/// elements and an absent doctype are recovered the way a browser would.
pub fn parse(html: &str) -> Document {
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
    Document { dom }
}

impl Document {
    /// The document node itself
    pub fn root(&self) -> &Handle {
        &self.dom.document
    }

    /// Name of the doctype declaration, if any
    pub fn doctype_name(&self) -> Option<String> {
        self.dom
            .document
            .children
            .borrow()
            .iter()
            .find_map(|child| match &child.data {
                NodeData::Doctype { name, .. } => Some(name.to_string()),
                _ => None,
            })
    }

    /// Every element in document order
    pub fn elements(&self) -> Vec<Handle> {
        node::descendant_elements(&self.dom.document)
    }

    pub fn elements_by_tag(&self, tag: &str) -> Vec<Handle> {
        self.elements()
            .into_iter()
            .filter(|e| node::is_tag(e, tag))
            .collect()
    }

    /// First element with the given tag in document order
    pub fn find_first(&self, tag: &str) -> Option<Handle> {
        self.find_first_matching(|e| node::is_tag(e, tag))
    }

    pub fn find_first_matching<F>(&self, predicate: F) -> Option<Handle>
    where
        F: Fn(&Handle) -> bool,
    {
        self.elements().into_iter().find(|e| predicate(e))
    }

    pub fn head(&self) -> Option<Handle> {
        self.find_first("head")
    }

    pub fn element_count(&self) -> usize {
        self.elements().len()
    }

    /// Serialize the whole document back to markup
    pub fn to_html(&self) -> String {
        node::serialize_node(&self.dom.document, TraversalScope::ChildrenOnly(None))
    }
}
