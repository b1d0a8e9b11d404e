// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod file;
pub mod model;
pub mod progress;
pub mod project;
pub mod runner;
pub mod source;

pub use crate::core::{AttrValue, DomNode, Element};
pub use crawl::{consolidate, merge_tables, Crawler};
pub use error::{Error, FetchError, MalformedPageError, Result};
pub use extract::Extractor;
pub use model::{find_string, FindString, Record, RowEntry, SimpleCell, Table};
pub use source::{HttpSource, PageSource, StaticSource};
