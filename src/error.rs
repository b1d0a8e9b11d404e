// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// A page could not be retrieved or turned into a DOM.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url}: {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Offline sources only: nothing registered under this path.
    #[error("no page registered for {0}")]
    Missing(String),
}

/// A page (or data derived from one) does not have the shape we rely on.
#[derive(Debug, Error)]
pub enum MalformedPageError {
    #[error("table #{index} has neither a header section nor any rows")]
    EmptyTable { index: usize },

    #[error("hyperlink has no href attribute")]
    MissingHref,

    #[error("missing {what}")]
    Missing { what: String },

    #[error("unexpected shape: {what}")]
    Shape { what: String },
}

impl MalformedPageError {
    pub fn missing(what: impl Into<String>) -> Self {
        Self::Missing { what: what.into() }
    }

    pub fn shape(what: impl Into<String>) -> Self {
        Self::Shape { what: what.into() }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Malformed(#[from] MalformedPageError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
