// src/extract/table.rs
use crate::core::{DomNode, Element};
use crate::error::{MalformedPageError, Result};
use crate::model::{find_string, RowEntry, SimpleCell, Table};
use crate::source::PageSource;

use super::Extractor;

pub const TABLE_TAG: &str = "table";
pub const ROW_TAG: &str = "tr";
pub const HEAD_CELL: &str = "th";
pub const BODY_CELL: &str = "td";

const HEAD_SECTION: &str = "thead";
const BODY_SECTION: &str = "tbody";

impl<S: PageSource + ?Sized> Extractor<'_, S> {
    /// Every table on the page, in document order.
    pub fn extract_tables(&mut self, page: &DomNode) -> Result<Vec<Table>> {
        let Some(root) = page.as_element() else {
            return Ok(Vec::new());
        };

        let mut out = Vec::new();
        for (index, table) in root.find_all(TABLE_TAG).enumerate() {
            let head = table.find(HEAD_SECTION);
            let body = table.find(BODY_SECTION);
            if head.is_none() && body.is_none() {
                if table.find(ROW_TAG).is_none() {
                    return Err(MalformedPageError::EmptyTable { index }.into());
                }
                logw!("Table #{index} has rows outside thead/tbody; they are not extracted");
            }

            let head = match head {
                Some(section) => self.build_rows(section, HEAD_CELL)?,
                None => Vec::new(),
            };
            let body = match body {
                Some(section) => self.build_rows(section, BODY_CELL)?,
                None => Vec::new(),
            };
            out.push(Table { head, body });
        }
        Ok(out)
    }

    /// Rows of one table section, each a list of serialized `cell_tag` cells.
    ///
    /// A section with no rows and exactly one cell collapses to a single
    /// `{name, string}` entry: a one-label header spanning the whole table.
    pub fn build_rows(&mut self, section: &Element, cell_tag: &str) -> Result<Vec<RowEntry>> {
        let rows: Vec<&Element> = section.find_all(ROW_TAG).collect();

        if rows.is_empty() {
            let mut cells = section.find_all(cell_tag);
            if let (Some(cell), None) = (cells.next(), cells.next()) {
                let record = self.serialize_element(cell)?;
                return Ok(vec![RowEntry::Simple(SimpleCell {
                    name: cell.name.clone(),
                    string: find_string(&record).map(String::from),
                })]);
            }
        }

        rows.into_iter()
            .map(|row| {
                row.find_all(cell_tag)
                    .map(|cell| self.serialize_element(cell))
                    .collect::<Result<Vec<_>>>()
                    .map(RowEntry::Cells)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::CrawlOptions;
    use crate::error::Error;
    use crate::source::StaticSource;

    fn extractor(src: &StaticSource) -> Extractor<'_, StaticSource> {
        Extractor::new(src, &CrawlOptions::default())
    }

    #[test]
    fn single_header_cell_collapses() {
        let src = StaticSource::new();
        let thead = Element::new("thead").child(Element::new("th").text("Status"));
        let rows = extractor(&src).build_rows(&thead, HEAD_CELL).unwrap();
        assert_eq!(
            rows,
            vec![RowEntry::Simple(SimpleCell { name: s!("th"), string: Some(s!("Status")) })]
        );
    }

    #[test]
    fn collapsed_string_comes_from_nested_markup() {
        let src = StaticSource::new();
        let thead = Element::new("thead")
            .child(Element::new("th").child(Element::new("span").text("Status")).child(Element::new("br")));
        let rows = extractor(&src).build_rows(&thead, HEAD_CELL).unwrap();
        assert_eq!(rows[0], RowEntry::Simple(SimpleCell { name: s!("th"), string: Some(s!("Status")) }));
    }

    #[test]
    fn one_cell_inside_a_row_does_not_collapse() {
        let src = StaticSource::new();
        let thead = Element::new("thead")
            .child(Element::new("tr").child(Element::new("th").text("Status")));
        let rows = extractor(&src).build_rows(&thead, HEAD_CELL).unwrap();
        assert_eq!(rows.len(), 1);
        let cells = rows[0].cells().unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].string.as_deref(), Some("Status"));
    }

    #[test]
    fn rows_keep_only_cells_of_the_requested_tag() {
        let src = StaticSource::new();
        let tbody = Element::new("tbody")
            .child(Element::new("tr")
                .child(Element::new("th").text("row label"))
                .child(Element::new("td").text("1"))
                .child(Element::new("td").text("2")))
            .child(Element::new("tr").child(Element::new("td").text("3")));
        let rows = extractor(&src).build_rows(&tbody, BODY_CELL).unwrap();

        let strings: Vec<Vec<&str>> = rows
            .iter()
            .map(|r| r.cells().unwrap().iter().filter_map(|c| c.string.as_deref()).collect())
            .collect();
        assert_eq!(strings, vec![vec!["1", "2"], vec!["3"]]);
    }

    #[test]
    fn tables_in_document_order_with_missing_sections() {
        let src = StaticSource::new().with_html("/p", concat!(
            "<table><thead><tr><th>A</th></tr></thead></table>",
            "<div><table><tbody><tr><td>x</td></tr></tbody></table></div>",
        ));
        let page = src.fetch("/p").unwrap();
        let tables = extractor(&src).extract_tables(&page).unwrap();

        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].head.len(), 1);
        assert!(tables[0].body.is_empty());
        assert!(tables[1].head.is_empty());
        assert_eq!(tables[1].body.len(), 1);
    }

    #[test]
    fn table_without_header_or_rows_is_malformed() {
        let src = StaticSource::new().with_html("/p", "<table><caption>nothing</caption></table>");
        let page = src.fetch("/p").unwrap();
        let err = extractor(&src).extract_tables(&page).unwrap_err();
        assert!(matches!(err, Error::Malformed(MalformedPageError::EmptyTable { index: 0 })));
    }

    #[test]
    fn rows_directly_under_table_yield_empty_sections() {
        let src = StaticSource::new()
            .with_html("/p", "<table><tr><th>H</th></tr><tr><td>1</td></tr></table>");
        let page = src.fetch("/p").unwrap();
        let tables = extractor(&src).extract_tables(&page).unwrap();

        assert_eq!(tables.len(), 1);
        assert!(tables[0].head.is_empty());
        assert!(tables[0].body.is_empty());
    }

    #[test]
    fn page_without_tables() {
        let src = StaticSource::new().with_html("/p", "<p>nothing here</p>");
        let page = src.fetch("/p").unwrap();
        assert!(extractor(&src).extract_tables(&page).unwrap().is_empty());
    }
}
