//! `Link` header parsing
//!
//! Format: comma-separated segments of the form `<url>; rel="name"`.
//! Canvas emits `current`, `next`, `prev`, `first` and `last` relations.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static LINK_SEGMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^<(?P<url>[^<>\s]+)>;\s*rel="(?P<rel>[a-z]+)"$"#).unwrap());

/// The relation → URL set decoded from one response's `Link` header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// URL of the page that produced this header
    pub current: Option<String>,
    /// URL of the next page
    pub next: Option<String>,
    /// URL of the previous page
    pub prev: Option<String>,
    /// URL of the first page
    pub first: Option<String>,
    /// URL of the last page
    pub last: Option<String>,
}

impl PageLinks {
    /// Parse a `Link` header value
    ///
    /// Every comma-separated segment must match the `<url>; rel="name"`
    /// grammar; segments with an unknown relation name are ignored.
    pub fn parse(header: &str) -> Result<Self> {
        let mut links = Self::default();

        for segment in header.split(',') {
            let segment = segment.trim();
            let captures = LINK_SEGMENT.captures(segment).ok_or_else(|| {
                Error::header_parse(format!("segment does not match <url>; rel=\"name\": {segment:?}"))
            })?;

            let url = captures["url"].to_string();
            match &captures["rel"] {
                "current" => links.current = Some(url),
                "next" => links.next = Some(url),
                "prev" => links.prev = Some(url),
                "first" => links.first = Some(url),
                "last" => links.last = Some(url),
                _ => {}
            }
        }

        Ok(links)
    }

    /// Decide where the traversal goes after this page
    ///
    /// `Ok(None)` means the current page is the last one. Continuation is
    /// implied whenever `last == current` cannot be established, and then a
    /// missing `next` link is a hard error rather than silent termination.
    pub fn next_page(&self) -> Result<Option<String>> {
        if self.last.is_some() && self.last == self.current {
            return Ok(None);
        }

        match &self.next {
            Some(next) => Ok(Some(next.clone())),
            None => Err(Error::traversal(
                "continuation implied (last != current) but no next link present",
            )),
        }
    }
}
