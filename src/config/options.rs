// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub fetch: FetchOptions,
    pub crawl: CrawlOptions,
    pub export: ExportOptions,
}

/// Where pages come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchOptions {
    /// Root every relative link is resolved against, e.g. `http://listing.example`.
    pub base_url: String,
    /// First listing page, relative to `base_url`.
    pub start_path: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Collapse layout whitespace before parsing.
    pub minify: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            base_url: s!(),
            start_path: s!("/"),
            timeout_secs: TIMEOUT_SECS,
            user_agent: s!(USER_AGENT),
            minify: true,
        }
    }
}

/// What to do when one part of the traversal fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Propagate the error; the crawl fails.
    #[default]
    Abort,
    /// Log it and carry on without that link/page.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrawlOptions {
    /// Failed hyperlink expansion inside a table.
    pub on_link_error: ErrorPolicy,
    /// Failed extraction of a listing page, or of the fetch of the next one.
    pub on_page_error: ErrorPolicy,
    /// Refuse to expand a link whose target is already being expanded
    /// further up the chain.
    pub guard_cycles: bool,
    /// Stop after this many listing pages.
    pub max_pages: Option<usize>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            on_link_error: ErrorPolicy::Abort,
            on_page_error: ErrorPolicy::Abort,
            guard_cycles: true,
            max_pages: None,
        }
    }
}

/// Which cells of the consolidated tables feed the flat projection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectionSpec {
    /// Index of the consolidated table whose body lists the entries.
    pub table: usize,
    /// Column holding the hyperlink to each entry's detail page.
    pub link_column: usize,
    /// Column, in the detail table, whose cell carries key attribute and value.
    pub key_column: usize,
    /// Attribute of that cell naming the field.
    pub key_attr: String,
    /// Field whose value keys the entry in the name-keyed map.
    pub name_field: String,
}

impl Default for ProjectionSpec {
    fn default() -> Self {
        Self {
            table: PROJECT_TABLE,
            link_column: PROJECT_LINK_COLUMN,
            key_column: PROJECT_KEY_COLUMN,
            key_attr: s!(PROJECT_KEY_ATTR),
            name_field: s!(PROJECT_NAME_FIELD),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub pretty: bool,
    /// Also derive and write the list/dict projection.
    pub project: Option<ProjectionSpec>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            pretty: false,
            project: None,
        }
    }
}

impl ExportOptions {
    pub fn tables_path(&self) -> PathBuf { self.out_dir.join(TABLES_FILE) }
    pub fn list_path(&self) -> PathBuf { self.out_dir.join(LIST_FILE) }
    pub fn dict_path(&self) -> PathBuf { self.out_dir.join(DICT_FILE) }
}
