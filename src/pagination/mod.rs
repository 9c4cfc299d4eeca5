//! Pagination module
//!
//! Walks cursor-linked collection endpoints (RFC 5988 `Link` headers, the
//! Canvas flavor) and produces one flat, lazy item sequence.
//!
//! # Overview
//!
//! [`Paginated`] is a per-traversal builder: starting URL, optional unwrap
//! key, extra request parameters, and a page size. [`Paginated::stream`]
//! yields individual JSON items page by page, fetching the next page only
//! once the consumer has drained the current one. Dropping the stream early
//! issues no further request.

mod link;
mod pages;

pub use link::PageLinks;
pub use pages::{Paginated, DEFAULT_PER_PAGE};
