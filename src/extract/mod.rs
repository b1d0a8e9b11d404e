// src/extract/mod.rs
//! Page to tables.
//!
//! [`Extractor`] owns the two mutually recursive halves of extraction:
//! serializing elements into records (`element.rs`) and turning table
//! elements into head/body pairs (`table.rs`). Hyperlinks met while
//! serializing send it back to the page source and into table extraction for
//! the linked page, which is how per-row detail pages end up nested inside
//! the listing's records.

mod element;
mod table;

pub use element::IGNORED_TAGS;
pub use table::{HEAD_CELL, BODY_CELL, ROW_TAG, TABLE_TAG};

use crate::config::options::{CrawlOptions, ErrorPolicy};
use crate::core::DomNode;
use crate::error::{MalformedPageError, Result};
use crate::model::{Record, Table};
use crate::source::PageSource;

pub struct Extractor<'s, S: PageSource + ?Sized> {
    source: &'s S,
    on_link_error: ErrorPolicy,
    guard_cycles: bool,
    // keys of the pages currently being expanded, outermost first
    chain: Vec<String>,
}

impl<'s, S: PageSource + ?Sized> Extractor<'s, S> {
    pub fn new(source: &'s S, opts: &CrawlOptions) -> Self {
        Self {
            source,
            on_link_error: opts.on_link_error,
            guard_cycles: opts.guard_cycles,
            chain: Vec::new(),
        }
    }

    pub fn source(&self) -> &'s S {
        self.source
    }

    /// Extract the tables of a page known by `key`, which stays on the
    /// expansion chain while its records are built.
    pub fn extract_page(&mut self, key: String, page: &DomNode) -> Result<Vec<Table>> {
        self.chain.push(key);
        let out = self.extract_tables(page);
        self.chain.pop();
        out
    }

    /// Tables of the page `link` points at, or `None` when the link is not
    /// followed (cycle guard, or a failure under [`ErrorPolicy::Skip`]).
    fn expand_link(&mut self, link: &Record) -> Result<Option<Vec<Table>>> {
        let expanded = self.follow(link);
        match (expanded, self.on_link_error) {
            (Ok(tables), _) => Ok(tables),
            (Err(e), ErrorPolicy::Skip) => {
                logw!("Skipping link {:?}: {e}", link.attr_str("href").unwrap_or_default());
                Ok(None)
            }
            (Err(e), ErrorPolicy::Abort) => Err(e),
        }
    }

    fn follow(&mut self, link: &Record) -> Result<Option<Vec<Table>>> {
        let href = link.attr_str("href").ok_or(MalformedPageError::MissingHref)?;
        let key = self.source.page_key(href);

        if self.guard_cycles && self.chain.contains(&key) {
            logd!("Not following {href}: already expanding {key}");
            return Ok(None);
        }

        let page = self.source.fetch(href)?;
        self.extract_page(key, &page).map(Some)
    }
}
