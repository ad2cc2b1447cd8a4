//! Fixed-Point Pruner
//!
//! Repeatedly removes empty elements and collapses wrappers around a lone
//! media carrier until a full pass changes nothing.
//!
//! Each removal shrinks the element count and each collapse removes one
//! wrapper element, so the number of changing passes is bounded by the
//! initial element count. The loop still carries an explicit pass limit of
//! that bound plus one.
//!
//! A pass starts by summarizing every subtree once (media carriers with and
//! without a `src`, non-blank text nodes). Mutations patch the summaries of
//! their ancestors, so a pass costs time linear in the document plus the
//! depth of each change.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::{AddAssign, SubAssign};
use std::rc::Rc;

use markup5ever_rcdom::{Node, NodeData};

use crate::dom::node::{
    attr, children, descendants, detach, inner_html, outer_html, parent, replace_with, tag_name,
};
use crate::dom::{Document, NodeHandle};

/// `iframe` and `img`: emptiness is a missing `src`, not missing text
pub const MEDIA_CARRIERS: &[&str] = &["iframe", "img"];

pub fn is_media_carrier(node: &NodeHandle) -> bool {
    tag_name(node)
        .map(|tag| MEDIA_CARRIERS.contains(&tag))
        .unwrap_or(false)
}

/// A media carrier with a `src` that is present and not blank
pub fn has_source(node: &NodeHandle) -> bool {
    attr(node, "src")
        .map(|src| !src.trim().is_empty())
        .unwrap_or(false)
}

/// Text that renders as nothing. `trim` already strips non-breaking spaces.
fn is_blank_text(text: &str) -> bool {
    text.trim().is_empty()
}

/// What one pruning run did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Passes run, including the final pass that changed nothing
    pub passes: usize,
    pub removed: usize,
    pub collapsed: usize,
    /// True if the pass limit was hit before a fixed point
    pub hit_pass_limit: bool,
}

impl PruneReport {
    pub fn changed(&self) -> bool {
        self.removed > 0 || self.collapsed > 0
    }
}

/// What happened to one candidate in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Kept,
    Removed,
    Collapsed,
}

/// Counts over a node and everything below it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Summary {
    sourced: usize,
    unsourced: usize,
    /// Text nodes with at least one non-whitespace character
    text: usize,
}

impl Summary {
    /// What `node` contributes on its own
    fn of_node(node: &NodeHandle) -> Self {
        match &node.data {
            NodeData::Text { contents } if !is_blank_text(&contents.borrow()) => Self {
                text: 1,
                ..Self::default()
            },
            NodeData::Element { .. } if is_media_carrier(node) => {
                if has_source(node) {
                    Self {
                        sourced: 1,
                        ..Self::default()
                    }
                } else {
                    Self {
                        unsourced: 1,
                        ..Self::default()
                    }
                }
            }
            _ => Self::default(),
        }
    }

    fn carriers(&self) -> usize {
        self.sourced + self.unsourced
    }
}

impl AddAssign for Summary {
    fn add_assign(&mut self, other: Self) {
        self.sourced += other.sourced;
        self.unsourced += other.unsourced;
        self.text += other.text;
    }
}

impl SubAssign for Summary {
    fn sub_assign(&mut self, other: Self) {
        self.sourced = self.sourced.saturating_sub(other.sourced);
        self.unsourced = self.unsourced.saturating_sub(other.unsourced);
        self.text = self.text.saturating_sub(other.text);
    }
}

fn key(node: &NodeHandle) -> *const Node {
    Rc::as_ptr(node)
}

/// Per-pass view of the tree: subtree summaries and the nodes this pass has
/// already taken out
struct PassState {
    summaries: HashMap<*const Node, Summary>,
    removed: HashSet<*const Node>,
}

impl PassState {
    fn new(doc: &Document) -> Self {
        let root = doc.root();
        let mut order = vec![root.clone()];
        order.extend(descendants(root));

        // children follow their parent in pre-order, so walking backwards
        // sees every child before its parent
        let mut summaries = HashMap::with_capacity(order.len());
        for node in order.iter().rev() {
            let mut summary = Summary::of_node(node);
            for child in node.children.borrow().iter() {
                summary += summaries.get(&key(child)).copied().unwrap_or_default();
            }
            summaries.insert(key(node), summary);
        }

        Self {
            summaries,
            removed: HashSet::new(),
        }
    }

    fn summary(&self, node: &NodeHandle) -> Summary {
        self.summaries.get(&key(node)).copied().unwrap_or_default()
    }

    /// Apply a change below `node` to `node` and every ancestor
    fn patch_upwards(&mut self, node: Option<NodeHandle>, minus: Summary, plus: Summary) {
        let mut current = node;
        while let Some(ancestor) = current {
            if let Some(summary) = self.summaries.get_mut(&key(&ancestor)) {
                *summary -= minus;
                *summary += plus;
            }
            current = parent(&ancestor);
        }
    }

    fn remove(&mut self, node: &NodeHandle) {
        let above = parent(node);
        let summary = self.summary(node);
        detach(node);
        self.patch_upwards(above, summary, Summary::default());

        self.removed.insert(key(node));
        for below in descendants(node) {
            self.removed.insert(key(&below));
        }
    }

    fn collapse(&mut self, element: &NodeHandle, carrier: &NodeHandle) -> bool {
        let above = parent(element);
        let before = self.summary(element);
        let after = self.summary(carrier);
        if !replace_with(element, carrier) {
            return false;
        }
        self.patch_upwards(above, before, after);
        self.removed.insert(key(element));
        true
    }

    fn is_removed(&self, node: &NodeHandle) -> bool {
        self.removed.contains(&key(node))
    }

    /// The single media carrier below `element`, found by following the
    /// children whose subtree holds one
    fn locate_carrier(&self, element: &NodeHandle) -> Option<NodeHandle> {
        let mut current = element.clone();
        loop {
            let next = children(&current)
                .into_iter()
                .find(|child| self.summary(child).carriers() > 0)?;
            if is_media_carrier(&next) {
                return Some(next);
            }
            current = next;
        }
    }

    /// Apply the first matching step to one candidate still in the tree
    fn prune_element(&mut self, element: &NodeHandle) -> Outcome {
        if is_media_carrier(element) {
            if has_source(element) {
                return Outcome::Kept;
            }
            self.remove(element);
            return Outcome::Removed;
        }

        let summary = self.summary(element);
        match summary.carriers() {
            1 if summary.unsourced == 1 => match self.locate_carrier(element) {
                Some(carrier) => {
                    self.remove(&carrier);
                    Outcome::Removed
                }
                None => Outcome::Kept,
            },
            1 => {
                let kids = children(element);
                match kids.as_slice() {
                    [carrier] if is_bare_wrapper(element, carrier) => {
                        if self.collapse(element, carrier) {
                            Outcome::Collapsed
                        } else {
                            Outcome::Kept
                        }
                    }
                    _ => Outcome::Kept,
                }
            }
            0 if summary.text == 0 => {
                self.remove(element);
                Outcome::Removed
            }
            _ => Outcome::Kept,
        }
    }
}

/// Prunes the elements whose tag is in the candidate set
#[derive(Debug, Clone)]
pub struct FixedPointPruner {
    prunable_tags: BTreeSet<String>,
}

impl FixedPointPruner {
    pub fn new<I, S>(prunable_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prunable_tags: prunable_tags
                .into_iter()
                .map(|t| t.into().to_ascii_lowercase())
                .collect(),
        }
    }

    fn is_candidate(&self, node: &NodeHandle) -> bool {
        tag_name(node)
            .map(|tag| self.prunable_tags.contains(tag))
            .unwrap_or(false)
    }

    /// Current candidates in document order
    fn candidates(&self, doc: &Document) -> Vec<NodeHandle> {
        doc.elements()
            .into_iter()
            .filter(|e| self.is_candidate(e))
            .collect()
    }

    /// Run passes until one makes no removal and no collapse
    pub fn prune(&self, doc: &Document) -> PruneReport {
        let pass_limit = doc.element_count() + 1;
        let mut report = PruneReport::default();

        loop {
            if report.passes >= pass_limit {
                log::warn!(
                    "Pruning stopped after {} passes without reaching a fixed point",
                    report.passes
                );
                report.hit_pass_limit = true;
                break;
            }
            report.passes += 1;

            let mut state = PassState::new(doc);
            let mut changed = false;
            for element in self.candidates(doc) {
                if state.is_removed(&element) {
                    continue;
                }
                match state.prune_element(&element) {
                    Outcome::Kept => {}
                    Outcome::Removed => {
                        report.removed += 1;
                        changed = true;
                    }
                    Outcome::Collapsed => {
                        report.collapsed += 1;
                        changed = true;
                    }
                }
            }

            if !changed {
                break;
            }
        }

        log::debug!(
            "Pruning finished after {} pass(es): {} removed, {} collapsed",
            report.passes,
            report.removed,
            report.collapsed
        );
        report
    }
}

/// The wrapper's only child is the carrier and it adds nothing around it
fn is_bare_wrapper(element: &NodeHandle, carrier: &NodeHandle) -> bool {
    is_media_carrier(carrier) && inner_html(element).trim() == outer_html(carrier)
}
