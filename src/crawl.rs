// src/crawl.rs
//! Listing traversal and consolidation.
//!
//! Starting from one listing page, extract its tables, fold them into the
//! running result, and follow the page's "next" link until there is none.
//! Tables with equal heads are the same table: later pages only add body rows.

use crate::config::options::{CrawlOptions, ErrorPolicy};
use crate::core::dom::{DomNode, Element};
use crate::error::{MalformedPageError, Result};
use crate::extract::Extractor;
use crate::model::{Table, LINK_TAG};
use crate::progress::Progress;
use crate::source::PageSource;

const NEXT_ITEM_TAG: &str = "li";
const NEXT_CLASS: &str = "next";

/// Fold one page's tables into the accumulated result.
///
/// A table whose head equals an accumulated head has its body rows appended
/// to that table, in order; any other table is appended as new. First-seen
/// order of tables is preserved. Rows are never deduplicated.
pub fn merge_tables(mut acc: Vec<Table>, page: Vec<Table>) -> Vec<Table> {
    for table in page {
        match acc.iter_mut().find(|t| t.same_table(&table)) {
            Some(existing) => existing.body.extend(table.body),
            None => acc.push(table),
        }
    }
    acc
}

/// [`merge_tables`] over a whole sequence of per-page table lists.
pub fn consolidate<I>(pages: I) -> Vec<Table>
where
    I: IntoIterator<Item = Vec<Table>>,
{
    pages.into_iter().fold(Vec::new(), merge_tables)
}

/// `href` of the page's "next" link: the first hyperlink inside the first
/// list item whose class is exactly `next` and which holds a hyperlink.
pub fn next_page_href(page: &DomNode) -> std::result::Result<Option<String>, MalformedPageError> {
    let Some(root) = page.as_element() else {
        return Ok(None);
    };
    let next_link = root
        .find_all(NEXT_ITEM_TAG)
        .filter(|li| is_next_item(li))
        .find_map(|li| li.find(LINK_TAG));

    match next_link {
        None => Ok(None),
        Some(a) => a
            .get_attr("href")
            .and_then(|v| v.as_str())
            .map(|href| Some(s!(href)))
            .ok_or(MalformedPageError::MissingHref),
    }
}

fn is_next_item(li: &Element) -> bool {
    li.get_attr("class").is_some_and(|c| c.is_single_token(NEXT_CLASS))
}

pub struct Crawler<S: PageSource> {
    source: S,
    opts: CrawlOptions,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(source: S, opts: CrawlOptions) -> Self {
        Self { source, opts }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Crawl from `start` and return the consolidated tables.
    pub fn crawl(&self, start: &str) -> Result<Vec<Table>> {
        self.crawl_with_progress(start, None)
    }

    pub fn crawl_with_progress(
        &self,
        start: &str,
        mut progress: Option<&mut (dyn Progress + '_)>,
    ) -> Result<Vec<Table>> {
        let mut extractor = Extractor::new(&self.source, &self.opts);
        let mut tables: Vec<Table> = Vec::new();

        let mut path = s!(start);
        let mut page = self.source.fetch(start)?;
        let mut index = 0usize;

        loop {
            let key = self.source.page_key(&path);
            match extractor.extract_page(key, &page) {
                Ok(found) => {
                    logf!("Page {index} ({path}): {} table(s)", found.len());
                    if let Some(p) = progress.as_deref_mut() {
                        p.page_done(index, &path, found.len());
                    }
                    tables = merge_tables(tables, found);
                }
                Err(e) if self.opts.on_page_error == ErrorPolicy::Skip => {
                    logw!("Page {index} ({path}) skipped: {e}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.page_skipped(index, &path, &e.to_string());
                    }
                }
                Err(e) => {
                    loge!("Page {index} ({path}): {e}");
                    return Err(e);
                }
            }
            index += 1;

            if self.opts.max_pages.is_some_and(|max| index >= max) {
                logf!("Stopping after {index} page(s)");
                break;
            }

            let next = match next_page_href(&page) {
                Ok(Some(next)) => next,
                Ok(None) => break,
                Err(e) if self.opts.on_page_error == ErrorPolicy::Skip => {
                    logw!("Next link on {path} unusable, ending crawl: {e}");
                    break;
                }
                Err(e) => return Err(e.into()),
            };
            match self.source.fetch(&next) {
                Ok(p) => {
                    page = p;
                    path = next;
                }
                Err(e) if self.opts.on_page_error == ErrorPolicy::Skip => {
                    logw!("Next page {next} unavailable, ending crawl: {e}");
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html;
    use crate::model::{Record, RowEntry, SimpleCell};

    fn head(label: &str) -> Vec<RowEntry> {
        vec![RowEntry::Simple(SimpleCell { name: s!("th"), string: Some(s!(label)) })]
    }

    fn row(value: &str) -> RowEntry {
        RowEntry::Cells(vec![Record { name: Some(s!("td")), string: Some(s!(value)), ..Default::default() }])
    }

    #[test]
    fn merge_appends_bodies_of_equal_heads() {
        let a = Table { head: head("Companies"), body: vec![row("A")] };
        let b = Table { head: head("Companies"), body: vec![row("B")] };
        let out = consolidate(vec![vec![a], vec![b]]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].body, vec![row("A"), row("B")]);
    }

    #[test]
    fn merge_keeps_distinct_heads_apart_in_first_seen_order() {
        let a = Table { head: head("Companies"), body: vec![row("A")] };
        let s = Table { head: head("Sponsors"), body: vec![row("S")] };
        let b = Table { head: head("Companies"), body: vec![row("B"), row("A")] };
        let out = consolidate(vec![vec![a, s], vec![b]]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].head, head("Companies"));
        // no dedup of rows
        assert_eq!(out[0].body, vec![row("A"), row("B"), row("A")]);
        assert_eq!(out[1].body, vec![row("S")]);
    }

    #[test]
    fn next_link_needs_exact_class() {
        let page = html::parse(r#"<ul>
            <li class="next disabled"><a href="/wrong">x</a></li>
            <li class="previous"><a href="/prev">p</a></li>
            <li class="next"><a href="/p2">Next</a></li></ul>"#);
        assert_eq!(next_page_href(&page).unwrap().as_deref(), Some("/p2"));
    }

    #[test]
    fn next_item_without_link_is_passed_over() {
        let page = html::parse(r#"<li class="next">end</li>"#);
        assert_eq!(next_page_href(&page).unwrap(), None);
        let page = html::parse("<p>no pager</p>");
        assert_eq!(next_page_href(&page).unwrap(), None);
    }

    #[test]
    fn next_link_without_href_is_malformed() {
        let page = html::parse(r#"<li class="next"><a>Next</a></li>"#);
        assert!(matches!(next_page_href(&page), Err(MalformedPageError::MissingHref)));
    }
}
