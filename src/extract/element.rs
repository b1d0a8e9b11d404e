// src/extract/element.rs
use crate::core::{DomNode, Element};
use crate::error::Result;
use crate::model::Record;
use crate::source::PageSource;

use super::Extractor;

/// Typographic wrappers that never show up among a record's children.
pub const IGNORED_TAGS: &[&str] = &["b", "u", "i"];

fn keep_child(child: &Record) -> bool {
    match child.name.as_deref() {
        Some(name) => !IGNORED_TAGS.contains(&name),
        None => false,
    }
}

impl<S: PageSource + ?Sized> Extractor<'_, S> {
    /// Convert one node into a record.
    ///
    /// Text nodes become leaf records holding only their text. Elements keep
    /// their name, single string and attributes, and recurse into their
    /// children; a hyperlink child additionally gets the tables of the page it
    /// points at. Children without a tag, and `b`/`u`/`i` wrappers, are
    /// dropped after being serialized.
    pub fn serialize(&mut self, node: &DomNode) -> Result<Record> {
        match node {
            DomNode::Text(text) => Ok(Record::text(text)),
            DomNode::Element(el) => self.serialize_element(el),
        }
    }

    pub(super) fn serialize_element(&mut self, el: &Element) -> Result<Record> {
        let mut record = Record {
            name: Some(el.name.clone()),
            string: el.direct_text().filter(|t| !t.is_empty()).map(String::from),
            attrs: el.attrs.clone(),
            children: None,
            tables: None,
        };

        for child in &el.children {
            let mut rec = self.serialize(child)?;
            if rec.is_link() {
                rec.tables = self.expand_link(&rec)?;
            }
            if keep_child(&rec) {
                record.children.get_or_insert_with(Vec::new).push(rec);
            }
        }
        Ok(record)
    }
}
