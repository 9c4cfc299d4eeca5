//! # canvas-kit
//!
//! Thin client libraries and CLI glue for the Canvas LMS REST/GraphQL API
//! and the GitHub REST API, plus a generator for QTI-compliant question
//! banks consumable by Canvas's quiz import.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use canvas_kit::{Canvas, ClientConfig, HttpClient, Result, SubmissionIncludes};
//! use futures::stream::TryStreamExt;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let http = HttpClient::new(
//!         ClientConfig::builder()
//!             .base_url("https://canvas.example.edu")
//!             .token(std::env::var("CANVAS_TOKEN").unwrap())
//!             .build(),
//!     )?;
//!     let canvas = Canvas::new(Arc::new(http))
//!         .with_course(123)
//!         .with_assignment(456);
//!
//!     let mut submissions = canvas
//!         .submissions()?
//!         .index(&SubmissionIncludes::default())
//!         .stream();
//!     while let Some(submission) = submissions.try_next().await? {
//!         println!("{}", submission["id"]);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │  canvas::Canvas        github::GitHub        qti::Bank    │
//! │  (endpoint wrappers)   (REST wrappers)       (XML output) │
//! └───────────┬──────────────────┬───────────────────────────-┘
//!             │                  │
//! ┌───────────┴──────────────────┴───────────┐
//! │  pagination::Paginated  →  http::HttpClient │
//! │  (Link-header cursor walk)  (bearer auth)   │
//! └──────────────────────────────────────────┘
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the crate
pub mod error;

/// Credential configuration
pub mod config;

/// Bearer-authenticated HTTP client
pub mod http;

/// Link-header pagination
pub mod pagination;

/// Canvas LMS API wrappers
pub mod canvas;

/// GitHub REST API wrappers
pub mod github;

/// QTI question bank generation
pub mod qti;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use canvas::{Canvas, SubmissionIncludes};
pub use config::Settings;
pub use error::{Error, Result};
pub use github::GitHub;
pub use http::{ClientConfig, HttpClient};
pub use pagination::{PageLinks, Paginated};
pub use qti::{Question, QuestionBank};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
