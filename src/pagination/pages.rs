//! Page traversal
//!
//! [`Paginated`] fetches pages one at a time and flattens their item arrays
//! into a single lazy sequence. Each traversal owns its own parameters and
//! cursor; re-running one against an unchanged dataset yields the same items.

use super::link::PageLinks;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use futures::stream::{self, Stream, TryStreamExt};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Default page size requested from the server
pub const DEFAULT_PER_PAGE: u32 = 10;

/// Where the traversal currently points
enum Cursor {
    /// First request, caller-supplied URL with full parameters
    Start(String),
    /// Follow-up request to a server-supplied `next` link
    Next(String),
    /// Traversal complete
    Done,
}

/// A single exhaustive traversal of a paged collection endpoint
///
/// Built once per call site; not restartable. The `per_page` parameter is
/// forced into the request parameters for the first request only. Follow-up
/// requests hit the server's `next` URL verbatim, so the explicit page size
/// never overrides whatever the `next` link already encodes.
pub struct Paginated {
    http: Arc<HttpClient>,
    url: String,
    key: Option<String>,
    params: Vec<(String, String)>,
    per_page: u32,
}

impl Paginated {
    /// Create a traversal starting at `url`
    pub fn new(http: Arc<HttpClient>, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            key: None,
            params: Vec::new(),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Unwrap the item array from the given field of each page body
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Add a request parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Set the page size
    #[must_use]
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Produce the lazy item sequence
    ///
    /// Items arrive in server order. The next page request is issued only
    /// after the consumer has pulled every item of the current page; a
    /// dropped stream fetches nothing further.
    pub fn stream(self) -> impl Stream<Item = Result<Value>> + Send {
        let Paginated {
            http,
            url,
            key,
            mut params,
            per_page,
        } = self;

        // per_page overwrites any caller-supplied value
        params.retain(|(k, _)| k != "per_page");
        params.push(("per_page".to_string(), per_page.to_string()));

        let pages = stream::try_unfold(Cursor::Start(url), move |cursor| {
            let http = Arc::clone(&http);
            let key = key.clone();
            let params = params.clone();

            async move {
                let (url, query) = match cursor {
                    Cursor::Start(url) => (url, params),
                    Cursor::Next(url) => (url, Vec::new()),
                    Cursor::Done => return Ok::<_, Error>(None),
                };

                let response = http.get(&url, &query).await?;

                // Grab the header before the body read consumes the response.
                let link_header = response
                    .headers()
                    .get("link")
                    .map(|v| {
                        v.to_str()
                            .map(str::to_owned)
                            .map_err(|_| Error::header_parse("Link header is not valid UTF-8"))
                    })
                    .transpose()?;

                let body: Value = response.json().await.map_err(Error::Http)?;
                let items = unwrap_items(body, key.as_deref())?;
                debug!("Fetched page with {} items from {}", items.len(), url);

                // No Link header at all: a single-page collection.
                let next = match link_header {
                    None => Cursor::Done,
                    Some(raw) => match PageLinks::parse(&raw)?.next_page()? {
                        Some(next_url) => Cursor::Next(next_url),
                        None => Cursor::Done,
                    },
                };

                Ok(Some((items, next)))
            }
        });

        pages
            .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
            .try_flatten()
    }

    /// Drain the whole traversal into a vector
    pub async fn collect(self) -> Result<Vec<Value>> {
        self.stream().try_collect().await
    }
}

impl std::fmt::Debug for Paginated {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginated")
            .field("url", &self.url)
            .field("key", &self.key)
            .field("per_page", &self.per_page)
            .finish_non_exhaustive()
    }
}

/// Extract the item array from a page body
fn unwrap_items(body: Value, key: Option<&str>) -> Result<Vec<Value>> {
    match key {
        Some(key) => match body {
            Value::Object(mut map) => match map.remove(key) {
                Some(Value::Array(items)) => Ok(items),
                Some(_) => Err(Error::response_shape(format!(
                    "field '{key}' is not an array"
                ))),
                None => Err(Error::response_shape(format!(
                    "field '{key}' missing from page body"
                ))),
            },
            _ => Err(Error::response_shape(format!(
                "page body is not an object, cannot unwrap '{key}'"
            ))),
        },
        None => match body {
            Value::Array(items) => Ok(items),
            _ => Err(Error::response_shape("page body is not an array")),
        },
    }
}
