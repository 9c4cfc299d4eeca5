//! Bearer-authenticated HTTP client
//!
//! Wraps `reqwest` with:
//! - Mandatory base URL and bearer token
//! - `Authorization` / `Content-Type` headers on every request
//! - Non-2xx responses normalized into `Error::HttpStatus`

use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Query parameters as key/value pairs
///
/// Pairs rather than a map: Canvas uses repeated keys (`include[]`) that a
/// map cannot express.
pub type Query = Vec<(String, String)>;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Extra headers sent with every request
    pub default_headers: Vec<(String, String)>,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: Duration::from_secs(30),
            default_headers: Vec::new(),
            user_agent: format!("canvas-kit/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for client config
#[derive(Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.push((key.into(), value.into()));
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

/// Bearer-authenticated HTTP client
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a new client
    ///
    /// Fails when `base_url` or `token` is absent or empty; there is no
    /// implicit empty-string fallback.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| Error::missing_field("base_url"))?;
        let token = config
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::missing_field("token"))?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|_| Error::config("token contains invalid header characters"))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (key, value) in &config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|_| Error::config(format!("invalid header name: {key}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::config(format!("invalid header value for {key}")))?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, base_url })
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Make a GET request
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Response> {
        self.request(Method::GET, path, query, None).await
    }

    /// Make a POST request with a JSON body
    pub async fn post(
        &self,
        path: &str,
        body: &Value,
        query: &[(String, String)],
    ) -> Result<Response> {
        self.request(Method::POST, path, query, Some(body)).await
    }

    /// Make a PUT request with a JSON body
    pub async fn put(
        &self,
        path: &str,
        body: &Value,
        query: &[(String, String)],
    ) -> Result<Response> {
        self.request(Method::PUT, path, query, Some(body)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str, query: &[(String, String)]) -> Result<Response> {
        self.request(Method::DELETE, path, query, None).await
    }

    /// Make a single request and fail on any non-2xx status
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> Result<Response> {
        let full_url = self.build_url(path);

        let mut req = self.client.request(method.clone(), &full_url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(Error::Http)?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Request succeeded: {} {}", method, full_url);
        Ok(response)
    }

    /// Make a GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let response = self.get(path, query).await?;
        let json: T = response.json().await.map_err(Error::Http)?;
        Ok(json)
    }

    /// Make a POST request and parse the JSON response
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        query: &[(String, String)],
    ) -> Result<T> {
        let response = self.post(path, body, query).await?;
        let json: T = response.json().await.map_err(Error::Http)?;
        Ok(json)
    }

    /// Make a PUT request and parse the JSON response
    pub async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
        query: &[(String, String)],
    ) -> Result<T> {
        let response = self.put(path, body, query).await?;
        let json: T = response.json().await.map_err(Error::Http)?;
        Ok(json)
    }

    /// Build full URL from path
    ///
    /// Absolute URLs pass through untouched so pagination can follow
    /// server-supplied `next` links.
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
