// src/source.rs
//! Where pages come from.
//!
//! The extractor only ever asks a [`PageSource`] for a parsed page by the
//! path a link carried. [`HttpSource`] fetches over the network;
//! [`StaticSource`] serves captured fixtures from memory so extraction can be
//! exercised offline.

use std::cell::RefCell;
use std::collections::HashMap;

use reqwest::blocking::Client;
use url::Url;

use crate::config::options::FetchOptions;
use crate::core::{html, net, sanitize, DomNode};
use crate::error::FetchError;

pub trait PageSource {
    /// Retrieve and parse the page `path` points at.
    fn fetch(&self, path: &str) -> Result<DomNode, FetchError>;

    /// Canonical name of the page `path` points at. Two paths with the same
    /// key are the same page.
    fn page_key(&self, path: &str) -> String {
        s!(path)
    }
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn fetch(&self, path: &str) -> Result<DomNode, FetchError> {
        (**self).fetch(path)
    }

    fn page_key(&self, path: &str) -> String {
        (**self).page_key(path)
    }
}

/* ---------------- HTTP ---------------- */

pub struct HttpSource {
    client: Client,
    base: Url,
    minify: bool,
}

impl HttpSource {
    pub fn new(opts: &FetchOptions) -> Result<Self, FetchError> {
        let base = Url::parse(&opts.base_url)
            .map_err(|source| FetchError::Url { url: opts.base_url.clone(), source })?;
        Ok(Self {
            client: net::build_client(opts)?,
            base,
            minify: opts.minify,
        })
    }

    pub fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        net::resolve(&self.base, path)
    }
}

impl PageSource for HttpSource {
    fn fetch(&self, path: &str) -> Result<DomNode, FetchError> {
        let url = self.url_for(path)?;
        let t = std::time::Instant::now();
        let body = net::http_get(&self.client, &url)?;
        logd!("GET {url} ({} bytes) in {:?}", body.len(), t.elapsed());

        let markup = if self.minify { sanitize::minify(&body) } else { body };
        Ok(html::parse(&markup))
    }

    fn page_key(&self, path: &str) -> String {
        match self.url_for(path) {
            Ok(mut url) => {
                url.set_fragment(None);
                url.into()
            }
            Err(_) => s!(path),
        }
    }
}

/* ---------------- in-memory ---------------- */

/// Pages served from memory, keyed by the exact path links use.
#[derive(Default)]
pub struct StaticSource {
    pages: HashMap<String, DomNode>,
    minify: bool,
    fetched: RefCell<Vec<String>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run markup through [`sanitize::minify`] before parsing, like the HTTP source.
    #[must_use]
    pub fn minified(mut self) -> Self {
        self.minify = true;
        self
    }

    pub fn insert(&mut self, path: &str, page: DomNode) -> &mut Self {
        self.pages.insert(s!(path), page);
        self
    }

    pub fn insert_html(&mut self, path: &str, markup: &str) -> &mut Self {
        let page = if self.minify {
            html::parse(&sanitize::minify(markup))
        } else {
            html::parse(markup)
        };
        self.insert(path, page)
    }

    #[must_use]
    pub fn with_html(mut self, path: &str, markup: &str) -> Self {
        self.insert_html(path, markup);
        self
    }

    /// Every path fetched so far, in order.
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }
}

impl PageSource for StaticSource {
    fn fetch(&self, path: &str) -> Result<DomNode, FetchError> {
        self.fetched.borrow_mut().push(s!(path));
        self.pages
            .get(path)
            .cloned()
            .ok_or_else(|| FetchError::Missing(s!(path)))
    }
}
