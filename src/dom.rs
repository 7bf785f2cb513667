//! Document Module
//!
//! A live markup tree backed by html5ever's `RcDom`. This is the surface the binder
//! scans, clicks are dispatched on, and templating collaborators inject markup into.
//! Node identity is `Rc` pointer identity.

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, parse_fragment, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::rc::{Rc, Weak};

use crate::literal::LiveTextSource;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parse a full page. html5ever never fails on malformed markup; it repairs it.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), Default::default()).one(html);
        Self { dom }
    }

    /// The document node; the default scope for bind passes.
    pub fn root(&self) -> Handle {
        self.dom.document.clone()
    }

    pub fn element_by_id(&self, id: &str) -> Option<Handle> {
        find_element(&self.dom.document, &|node| {
            attribute(node, "id").as_deref() == Some(id)
        })
    }

    /// Parse `html` in the context of `parent` and append the result under it.
    /// Context matters: `<tr>` only survives inside a table section, and `<style>`
    /// stays in place instead of moving to `<head>`. Returns the inserted top-level
    /// nodes in document order.
    pub fn insert_html(&self, parent: &Handle, html: &str) -> Vec<Handle> {
        let context = match &parent.data {
            NodeData::Element { name, .. } => name.clone(),
            _ => QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from("body")),
        };
        let fragment = parse_fragment(RcDom::default(), Default::default(), context, Vec::new())
            .one(html);
        // Fragment parses put everything under a synthetic <html> root
        let Some(root) = find_element(&fragment.document, &|node| tag_name(node) == Some("html"))
        else {
            return Vec::new();
        };

        // Detach before `fragment` drops, its teardown would empty these subtrees
        let moved: Vec<Handle> = root.children.borrow_mut().drain(..).collect();
        for child in &moved {
            child.parent.set(Some(Rc::downgrade(parent)));
            parent.children.borrow_mut().push(child.clone());
        }
        moved
    }

    /// Detach `node` from its parent. Returns false if it was already detached.
    pub fn remove(&self, node: &Handle) -> bool {
        let Some(parent) = parent_of(node) else {
            return false;
        };
        parent
            .children
            .borrow_mut()
            .retain(|child| !Rc::ptr_eq(child, node));
        node.parent.set(None);
        true
    }

    /// Whether `node` is still attached beneath this document's root.
    pub fn contains(&self, node: &Handle) -> bool {
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if Rc::ptr_eq(&n, &self.dom.document) {
                return true;
            }
            current = parent_of(&n);
        }
        false
    }
}

impl LiveTextSource for Document {
    fn text_by_id(&self, id: &str) -> Option<String> {
        self.element_by_id(id).map(|node| text_content(&node))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NODE HELPERS
// ═══════════════════════════════════════════════════════════════════════════════

pub fn tag_name(node: &Handle) -> Option<&str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Concatenated text of every text node under `node`.
pub fn text_content(node: &Handle) -> String {
    let mut out = String::new();
    collect_text(node, &mut out);
    out
}

fn collect_text(node: &Handle, out: &mut String) {
    if let NodeData::Text { contents } = &node.data {
        out.push_str(&contents.borrow());
    }
    for child in node.children.borrow().iter() {
        collect_text(child, out);
    }
}

/// An anchor pointing at a fragment on the same page (`href="#..."`).
pub fn is_fragment_link(node: &Handle) -> bool {
    tag_name(node) == Some("a")
        && attribute(node, "href")
            .map(|href| href.starts_with('#'))
            .unwrap_or(false)
}

pub fn parent_of(node: &Handle) -> Option<Handle> {
    // `Cell` only hands out the value by move, so put it back afterwards
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(Weak::upgrade);
    node.parent.set(weak);
    parent
}

/// Every element in the subtree rooted at `root`, `root` included, in document order.
pub fn elements(root: &Handle) -> Vec<Handle> {
    let mut out = Vec::new();
    collect_elements(root, &mut out);
    out
}

fn collect_elements(node: &Handle, out: &mut Vec<Handle>) {
    if matches!(node.data, NodeData::Element { .. }) {
        out.push(node.clone());
    }
    for child in node.children.borrow().iter() {
        collect_elements(child, out);
    }
}

fn find_element(node: &Handle, pred: &dyn Fn(&Handle) -> bool) -> Option<Handle> {
    if matches!(node.data, NodeData::Element { .. }) && pred(node) {
        return Some(node.clone());
    }
    for child in node.children.borrow().iter() {
        if let Some(found) = find_element(child, pred) {
            return Some(found);
        }
    }
    None
}
