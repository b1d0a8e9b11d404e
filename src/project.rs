// src/project.rs
//! Flatten detail pages into plain entries.
//!
//! Listings usually link every row to a detail page whose first table is a
//! two-column "field / value" sheet. The projection walks the consolidated
//! listing table, follows each row's expanded link into that sheet, and turns
//! it into one entry per listing row: `{<key attr of the value cell>: <its
//! string>}`. Entries also come keyed by their name field.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::config::options::ProjectionSpec;
use crate::error::MalformedPageError;
use crate::model::{Record, RowEntry, Table};

pub type Entry = BTreeMap<String, Value>;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Projection {
    pub list: Vec<Entry>,
    pub by_name: BTreeMap<String, Entry>,
}

pub fn project(tables: &[Table], spec: &ProjectionSpec) -> Result<Projection, MalformedPageError> {
    let listing = tables
        .get(spec.table)
        .ok_or_else(|| MalformedPageError::missing(format!("table #{}", spec.table)))?;

    let mut out = Projection::default();
    for (row_ix, row) in listing.body.iter().enumerate() {
        let mut entry = project_row(row, spec)
            .map_err(|e| MalformedPageError::shape(format!("listing row {row_ix}: {e}")))?;

        let name = match entry.get(&spec.name_field) {
            Some(Value::String(n)) => n.clone(),
            _ => {
                return Err(MalformedPageError::missing(format!(
                    "field {:?} in entry {row_ix}", spec.name_field
                )));
            }
        };
        let id = out.list.len();
        entry.insert(s!("id"), Value::from(id));
        out.by_name.insert(name, entry.clone());
        out.list.push(entry);
    }
    logd!("Projected {} entries", out.list.len());
    Ok(out)
}

fn project_row(row: &RowEntry, spec: &ProjectionSpec) -> Result<Entry, MalformedPageError> {
    let cells = row.cells().ok_or_else(|| MalformedPageError::shape("collapsed row"))?;
    let cell = cells
        .get(spec.link_column)
        .ok_or_else(|| MalformedPageError::missing(format!("column {}", spec.link_column)))?;
    let link = cell
        .children()
        .first()
        .ok_or_else(|| MalformedPageError::missing("link in cell"))?;
    let detail = detail_table(link)?;

    let mut entry = Entry::new();
    for detail_row in &detail.body {
        let value = detail_row
            .cells()
            .and_then(|c| c.get(spec.key_column))
            .ok_or_else(|| MalformedPageError::missing(format!("detail column {}", spec.key_column)))?;
        let key = value
            .attr_str(&spec.key_attr)
            .ok_or_else(|| MalformedPageError::missing(format!("attribute {:?}", spec.key_attr)))?;
        let v = value.string.clone().map_or(Value::Null, Value::String);
        entry.insert(s!(key), v);
    }
    Ok(entry)
}

fn detail_table(link: &Record) -> Result<&Table, MalformedPageError> {
    link.tables
        .as_deref()
        .ok_or_else(|| MalformedPageError::missing("expanded link tables"))?
        .first()
        .ok_or_else(|| MalformedPageError::missing("table on detail page"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dom::AttrValue;
    use crate::model::SimpleCell;

    fn td(id: Option<&str>, string: Option<&str>) -> Record {
        let mut r = Record {
            name: Some(s!("td")),
            string: string.map(String::from),
            ..Default::default()
        };
        if let Some(id) = id {
            r.attrs.insert(s!("id"), AttrValue::Single(s!(id)));
        }
        r
    }

    fn detail(fields: &[(&str, Option<&str>)]) -> Table {
        Table {
            head: vec![RowEntry::Simple(SimpleCell { name: s!("th"), string: Some(s!("Profile")) })],
            body: fields
                .iter()
                .map(|&(k, v)| RowEntry::Cells(vec![td(None, Some(k)), td(Some(k), v)]))
                .collect(),
        }
    }

    fn listing_row(detail_table: Table) -> RowEntry {
        let link = Record {
            name: Some(s!("a")),
            tables: Some(vec![detail_table]),
            ..Default::default()
        };
        let mut cell = td(None, None);
        cell.children = Some(vec![link]);
        RowEntry::Cells(vec![td(None, Some("1")), cell])
    }

    #[test]
    fn builds_list_and_name_map() {
        let listing = Table {
            head: vec![],
            body: vec![
                listing_row(detail(&[("name", Some("Acme")), ("city", Some("Oslo"))])),
                listing_row(detail(&[("name", Some("Bolt")), ("city", None)])),
            ],
        };
        let p = project(&[listing], &ProjectionSpec::default()).unwrap();

        assert_eq!(p.list.len(), 2);
        assert_eq!(p.list[0]["name"], "Acme");
        assert_eq!(p.list[0]["id"], 0);
        assert_eq!(p.list[1]["city"], Value::Null);
        assert_eq!(p.by_name["Bolt"]["id"], 1);
        assert_eq!(p.by_name["Acme"], p.list[0]);
    }

    #[test]
    fn missing_key_attribute_is_malformed() {
        let mut bad = detail(&[("name", Some("Acme"))]);
        bad.body = vec![RowEntry::Cells(vec![td(None, Some("name")), td(None, Some("Acme"))])];
        let listing = Table { head: vec![], body: vec![listing_row(bad)] };
        let err = project(&[listing], &ProjectionSpec::default()).unwrap_err();
        assert!(err.to_string().contains("attribute \"id\""));
    }

    #[test]
    fn unexpanded_link_is_malformed() {
        let mut row = listing_row(detail(&[]));
        if let RowEntry::Cells(cells) = &mut row {
            cells[1].children.as_mut().unwrap()[0].tables = None;
        }
        let listing = Table { head: vec![], body: vec![row] };
        assert!(project(&[listing], &ProjectionSpec::default()).is_err());
    }

    #[test]
    fn missing_table_is_malformed() {
        assert!(project(&[], &ProjectionSpec::default()).is_err());
    }
}
