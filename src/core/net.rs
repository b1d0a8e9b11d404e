// src/core/net.rs
// Blocking HTTP GET. The crawl is synchronous, one request at a time.

use std::time::Duration;

use reqwest::blocking::Client;
use url::Url;

use crate::config::options::FetchOptions;
use crate::error::FetchError;

pub fn build_client(opts: &FetchOptions) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(Duration::from_secs(opts.timeout_secs))
        .user_agent(opts.user_agent.as_str())
        .build()
        .map_err(FetchError::Client)
}

/// Resolve `path` against `base`. Absolute URLs pass through; anything else
/// is joined to the base. Parsing percent-encodes what needs encoding.
pub fn resolve(base: &Url, path: &str) -> Result<Url, FetchError> {
    match Url::parse(path) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base
            .join(path)
            .map_err(|source| FetchError::Url { url: s!(path), source }),
        Err(source) => Err(FetchError::Url { url: s!(path), source }),
    }
}

/// GET `url` and return the body, rejecting non-success statuses.
pub fn http_get(client: &Client, url: &Url) -> Result<String, FetchError> {
    let http_err = |source| FetchError::Http { url: url.to_string(), source };

    let resp = client.get(url.clone()).send().map_err(http_err)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
    }
    resp.text().map_err(http_err)
}
