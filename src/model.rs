// src/model.rs
//! Records and tables produced by the extractor.
//!
//! A [`Record`] mirrors one element: tag name, single string, attributes,
//! the children that survived filtering and, for hyperlinks, the tables of
//! the page the link points to. A [`Table`] is a head/body pair of row lists.
//!
//! Equality is structural and attribute order does not matter, which is what
//! makes two tables from different pages "the same table" when their heads
//! compare equal.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::core::dom::{AttrValue, Attrs};

/// Tag of the hyperlink element.
pub const LINK_TAG: &str = "a";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Record {
    pub name: Option<String>,
    pub string: Option<String>,
    pub attrs: Attrs,
    pub children: Option<Vec<Record>>,
    /// Only ever set on hyperlink records.
    pub tables: Option<Vec<Table>>,
}

impl Record {
    pub fn text(text: &str) -> Self {
        Self {
            string: Some(s!(text)).filter(|t| !t.is_empty()),
            ..Default::default()
        }
    }

    pub fn is_link(&self) -> bool {
        self.name.as_deref() == Some(LINK_TAG)
    }

    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }

    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(AttrValue::as_str)
    }

    pub fn children(&self) -> &[Record] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Attributes hidden in JSON by a structural field of the same name.
    pub fn shadowed_attrs(&self) -> impl Iterator<Item = &str> {
        self.attrs.keys().map(String::as_str).filter(move |k| match *k {
            "name" => true,
            "string" => self.string.is_some(),
            "children" => self.children.is_some(),
            "tables" => self.tables.is_some(),
            _ => false,
        })
    }
}

/// One entry of a table section: a row of cells, or the flattened record a
/// single-cell section collapses to.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum RowEntry {
    Cells(Vec<Record>),
    Simple(SimpleCell),
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct SimpleCell {
    pub name: String,
    pub string: Option<String>,
}

impl RowEntry {
    pub fn cells(&self) -> Option<&[Record]> {
        match self {
            RowEntry::Cells(c) => Some(c),
            RowEntry::Simple(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Table {
    pub body: Vec<RowEntry>,
    pub head: Vec<RowEntry>,
}

impl Table {
    /// Two tables are the same table when their heads are equal.
    pub fn same_table(&self, other: &Table) -> bool {
        self.head == other.head
    }
}

/* ---------------- first-string search ---------------- */

/// Depth-first search for the first `string` in a nested structure.
///
/// A record answers with its own string if it has one, otherwise searches
/// its fields in the order name, string, attributes, children, tables. Names
/// and attribute values are plain scalars and never answer. A list only
/// searches its first element. A bare string answers with itself, which
/// makes the search idempotent.
pub trait FindString {
    fn find_string(&self) -> Option<&str>;
}

impl FindString for str {
    fn find_string(&self) -> Option<&str> { Some(self) }
}

impl FindString for String {
    fn find_string(&self) -> Option<&str> { Some(self) }
}

impl<T: FindString> FindString for [T] {
    fn find_string(&self) -> Option<&str> {
        self.first()?.find_string()
    }
}

impl<T: FindString> FindString for Vec<T> {
    fn find_string(&self) -> Option<&str> {
        self.as_slice().find_string()
    }
}

impl FindString for Record {
    fn find_string(&self) -> Option<&str> {
        if let Some(s) = &self.string {
            return Some(s);
        }
        self.children
            .as_deref()
            .and_then(FindString::find_string)
            .or_else(|| self.tables.as_deref().and_then(FindString::find_string))
    }
}

impl FindString for SimpleCell {
    fn find_string(&self) -> Option<&str> {
        self.string.as_deref()
    }
}

impl FindString for RowEntry {
    fn find_string(&self) -> Option<&str> {
        match self {
            RowEntry::Cells(c) => c.find_string(),
            RowEntry::Simple(s) => s.find_string(),
        }
    }
}

impl FindString for Table {
    fn find_string(&self) -> Option<&str> {
        self.head.find_string().or_else(|| self.body.find_string())
    }
}

pub fn find_string<T: FindString + ?Sized>(data: &T) -> Option<&str> {
    data.find_string()
}

/* ---------------- JSON ---------------- */

#[derive(serde::Serialize)]
#[serde(untagged)]
enum Field<'a> {
    Text(Option<&'a str>),
    Attr(&'a AttrValue),
    Records(&'a [Record]),
    Tables(&'a [Table]),
}

/// One flat object with sorted keys. Attributes share the object with the
/// structural fields; an attribute named like one of them is shadowed.
impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        for key in self.shadowed_attrs() {
            logd!("Attribute {key:?} on <{}> shadowed in JSON", self.name.as_deref().unwrap_or_default());
        }

        let mut fields: BTreeMap<&str, Field<'_>> = self
            .attrs
            .iter()
            .map(|(k, v)| (k.as_str(), Field::Attr(v)))
            .collect();

        fields.insert("name", Field::Text(self.name.as_deref()));
        if let Some(s) = &self.string {
            fields.insert("string", Field::Text(Some(s)));
        }
        if let Some(c) = &self.children {
            fields.insert("children", Field::Records(c));
        }
        if let Some(t) = &self.tables {
            fields.insert("tables", Field::Tables(t));
        }

        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (k, v) in &fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
