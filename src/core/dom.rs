// src/core/dom.rs
//! Read-only page tree handed to the extractor.
//!
//! A node is either an element (tag, attributes, ordered children) or a run
//! of text. Text nodes are leaves: they carry no attributes and no children.

use std::collections::BTreeMap;

use serde::Serialize;

/// Tag name given to the synthetic root of a parsed page.
pub const DOCUMENT_TAG: &str = "[document]";

/// Attributes that hold a whitespace-separated token list rather than a
/// single string.
const LIST_ATTRS: &[&str] = &[
    "class",
    "rel",
    "rev",
    "accept-charset",
    "headers",
    "accesskey",
    "dropzone",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Single(String),
    List(Vec<String>),
}

impl AttrValue {
    /// Build the value for attribute `name`, splitting token-list attributes.
    pub fn parse(name: &str, raw: &str) -> Self {
        if LIST_ATTRS.contains(&name) {
            AttrValue::List(raw.split_whitespace().map(String::from).collect())
        } else {
            AttrValue::Single(s!(raw))
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Single(v) => Some(v),
            AttrValue::List(_) => None,
        }
    }

    /// True when the value is exactly the one token `token`.
    pub fn is_single_token(&self, token: &str) -> bool {
        match self {
            AttrValue::List(v) => v.len() == 1 && v[0] == token,
            AttrValue::Single(v) => v == token,
        }
    }
}

pub type Attrs = BTreeMap<String, AttrValue>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomNode {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Attrs,
    pub children: Vec<DomNode>,
}

impl DomNode {
    pub fn element(name: &str) -> Element {
        Element::new(name)
    }

    pub fn text(text: &str) -> DomNode {
        DomNode::Text(s!(text))
    }

    pub fn tag_name(&self) -> Option<&str> {
        match self {
            DomNode::Element(e) => Some(&e.name),
            DomNode::Text(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            DomNode::Element(e) => Some(e),
            DomNode::Text(_) => None,
        }
    }

    /// The node's "single string": a text node's own text, or the direct
    /// text of an element's only child.
    pub fn direct_text(&self) -> Option<&str> {
        match self {
            DomNode::Text(t) => Some(t),
            DomNode::Element(e) => e.direct_text(),
        }
    }
}

impl From<Element> for DomNode {
    fn from(e: Element) -> Self {
        DomNode::Element(e)
    }
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self { name: s!(name), ..Default::default() }
    }

    /* ---------- builder helpers (fixtures, tests) ---------- */

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(s!(name), AttrValue::parse(name, value));
        self
    }

    #[must_use]
    pub fn child(mut self, node: impl Into<DomNode>) -> Self {
        self.children.push(node.into());
        self
    }

    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.child(DomNode::text(text))
    }

    /* ---------- queries ---------- */

    pub fn get_attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn direct_text(&self) -> Option<&str> {
        match self.children.as_slice() {
            [only] => only.direct_text(),
            _ => None,
        }
    }

    /// All descendant elements, depth-first in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: self.children.iter().rev().collect() }
    }

    /// Descendant elements named `name`, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.descendants().filter(move |e| e.name == name)
    }

    /// First descendant element named `name`.
    pub fn find<'a>(&'a self, name: &'a str) -> Option<&'a Element> {
        self.find_all(name).next()
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a DomNode>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let DomNode::Element(e) = node {
                self.stack.extend(e.children.iter().rev());
                return Some(e);
            }
        }
        None
    }
}
