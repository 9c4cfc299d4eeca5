//! HTTP client module
//!
//! Provides the authenticated request wrapper shared by the Canvas and
//! GitHub layers. Every call is a single request: failures surface to the
//! caller, there are no retries and no rate limiting.

mod client;

pub use client::{ClientConfig, ClientConfigBuilder, HttpClient, Query};

#[cfg(test)]
mod tests;
