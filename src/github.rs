//! GitHub REST API client
//!
//! Thin wrapper over the shared HTTP client for the handful of GitHub
//! Classroom and release endpoints the CLI needs.

use crate::error::Result;
use crate::http::{ClientConfig, HttpClient};
use serde_json::{json, Value};
use std::time::Duration;

/// Default GitHub API base URL
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub REST client
#[derive(Debug)]
pub struct GitHub {
    http: HttpClient,
}

impl GitHub {
    /// Create a client against api.github.com
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(GITHUB_API_URL, token)
    }

    /// Create a client against a custom base URL (used by tests)
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let config = ClientConfig::builder()
            .base_url(base_url)
            .token(token)
            .timeout(Duration::from_secs(300))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .build();
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// List accepted assignments for a GitHub Classroom assignment
    ///
    /// <https://docs.github.com/en/rest/classroom/classroom#list-accepted-assignments-for-an-assignment>
    pub async fn list_accepted_assignments(
        &self,
        assignment_id: u64,
        per_page: u32,
    ) -> Result<Value> {
        let url = format!("/assignments/{assignment_id}/accepted_assignments");
        let query = vec![("per_page".to_string(), per_page.to_string())];
        self.http.get_json(&url, &query).await
    }

    /// Get the latest release of a repository
    pub async fn latest_release(&self, owner: &str, repo: &str) -> Result<Value> {
        let url = format!("/repos/{owner}/{repo}/releases/latest");
        self.http.get_json(&url, &[]).await
    }

    /// Create a release
    pub async fn create_release(
        &self,
        owner: &str,
        repo: &str,
        tag_name: &str,
        name: &str,
    ) -> Result<Value> {
        let url = format!("/repos/{owner}/{repo}/releases");
        let body = json!({ "tag_name": tag_name, "name": name });
        self.http.post_json(&url, &body, &[]).await
    }
}
