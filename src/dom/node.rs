//! Node Navigation
//!
//! Free functions over `markup5ever_rcdom` handles. Every query treats a
//! missing node, attribute or match as an ordinary result, never a failure.

use std::rc::{Rc, Weak};

use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::{Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, NodeData, SerializableHandle};

/// Tag name of an element, `None` for text, comments and the like
pub fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// True when `node` is an element with the given (lowercase) tag
pub fn is_tag(node: &Handle, tag: &str) -> bool {
    tag_name(node) == Some(tag)
}

/// Attribute value by name
pub fn attr(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| &*a.name.local == name)
            .map(|a| a.value.to_string()),
        _ => None,
    }
}

pub fn has_attr(node: &Handle, name: &str) -> bool {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs.borrow().iter().any(|a| &*a.name.local == name),
        _ => false,
    }
}

/// Class token match (`class="a b"` has class `a` and `b`)
pub fn has_class(node: &Handle, class: &str) -> bool {
    attr(node, "class")
        .map(|value| value.split_whitespace().any(|token| token == class))
        .unwrap_or(false)
}

pub fn has_id(node: &Handle, id: &str) -> bool {
    attr(node, "id").as_deref() == Some(id)
}

/// Remove an attribute. Returns whether anything was removed.
pub fn remove_attr(node: &Handle, name: &str) -> bool {
    match &node.data {
        NodeData::Element { attrs, .. } => {
            let mut attrs = attrs.borrow_mut();
            let before = attrs.len();
            attrs.retain(|a| &*a.name.local != name);
            attrs.len() != before
        }
        _ => false,
    }
}

/// Append a class token unless it is already present. Returns whether the
/// element changed.
pub fn add_class(node: &Handle, class: &str) -> bool {
    if !is_element(node) || has_class(node, class) {
        return false;
    }
    let NodeData::Element { attrs, .. } = &node.data else {
        return false;
    };

    let mut attrs = attrs.borrow_mut();
    match attrs.iter_mut().find(|a| &*a.name.local == "class") {
        Some(existing) => {
            let mut value = existing.value.trim().to_string();
            if !value.is_empty() {
                value.push(' ');
            }
            value.push_str(class);
            existing.value = value.into();
        }
        None => attrs.push(Attribute {
            name: QualName::new(None, Namespace::from(""), LocalName::from("class")),
            value: class.into(),
        }),
    }
    true
}

/// All child nodes, text included
pub fn children(node: &Handle) -> Vec<Handle> {
    node.children.borrow().clone()
}

pub fn element_children(node: &Handle) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .filter(|child| is_element(child))
        .cloned()
        .collect()
}

/// Parent node through the weak back-reference
pub fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(Weak::upgrade);
    node.parent.set(weak);
    parent
}

/// Parent node, only if it is an element
pub fn parent_element(node: &Handle) -> Option<Handle> {
    parent(node).filter(is_element)
}

/// Nearest ancestor element satisfying `predicate`, walking upwards from the
/// parent of `node`. The node itself is never considered.
pub fn find_ancestor<F>(node: &Handle, predicate: F) -> Option<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut current = parent_element(node);
    while let Some(ancestor) = current {
        if predicate(&ancestor) {
            return Some(ancestor);
        }
        current = parent_element(&ancestor);
    }
    None
}

/// Every descendant node in document order, excluding `node` itself
pub fn descendants(node: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    let mut stack: Vec<Handle> = node.children.borrow().iter().rev().cloned().collect();
    while let Some(next) = stack.pop() {
        stack.extend(next.children.borrow().iter().rev().cloned());
        out.push(next);
    }
    out
}

pub fn descendant_elements(node: &Handle) -> Vec<Handle> {
    descendants(node).into_iter().filter(is_element).collect()
}

/// Concatenated text of every text descendant
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    if let NodeData::Text { contents } = &node.data {
        text.push_str(&contents.borrow());
    }
    for child in descendants(node) {
        if let NodeData::Text { contents } = &child.data {
            text.push_str(&contents.borrow());
        }
    }
    text
}

/// Serialized children of `node`
pub fn inner_html(node: &Handle) -> String {
    serialize_node(node, TraversalScope::ChildrenOnly(None))
}

/// Serialized `node` including its own tag
pub fn outer_html(node: &Handle) -> String {
    serialize_node(node, TraversalScope::IncludeNode)
}

pub(crate) fn serialize_node(node: &Handle, traversal_scope: TraversalScope) -> String {
    let mut buf = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    if let Err(e) = serialize(&mut buf, &SerializableHandle::from(node.clone()), opts) {
        log::warn!("Failed to serialize node: {}", e);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Unlink `node` from its parent. A detached node is left untouched.
pub fn detach(node: &Handle) {
    if let Some(parent) = parent(node) {
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
    }
    node.parent.set(None);
}

/// Put `replacement` where `target` is. `replacement` is detached from its
/// current position first, so it may live inside `target`.
pub fn replace_with(target: &Handle, replacement: &Handle) -> bool {
    let Some(parent) = parent(target) else {
        return false;
    };
    detach(replacement);

    let mut siblings = parent.children.borrow_mut();
    let Some(index) = siblings.iter().position(|child| Rc::ptr_eq(child, target)) else {
        return false;
    };
    siblings[index] = replacement.clone();
    replacement.parent.set(Some(Rc::downgrade(&parent)));
    target.parent.set(None);
    true
}
