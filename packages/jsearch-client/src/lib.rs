//! Pure JSearch REST API client.
//!
//! A minimal client for the JSearch job-search API hosted on RapidAPI.
//! Issues one search request per call and hands back the listing items
//! as loosely-typed JSON, leaving field interpretation to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use jsearch_client::{JSearchClient, SearchRequest};
//!
//! let client = JSearchClient::new("your-rapidapi-key")?;
//!
//! let response = client.search(&SearchRequest::new("SRE in Bangalore, India")).await?;
//! for item in &response.data {
//!     println!("{}", item["job_title"]);
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{JSearchError, Result};
pub use types::{DatePosted, SearchRequest, SearchResponse};

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// RapidAPI host serving JSearch. Sent as `X-RapidAPI-Host` on every request.
pub const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";

const BASE_URL: &str = "https://jsearch.p.rapidapi.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct JSearchClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl std::fmt::Debug for JSearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JSearchClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl JSearchClient {
    /// Create a client with the default 30 second request timeout.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_timeout(api_key, DEFAULT_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key: SecretString::from(api_key.into()),
            base_url: BASE_URL.to_string(),
        })
    }

    /// Point the client at a different base URL (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut key = HeaderValue::from_str(self.api_key.expose_secret())
            .map_err(|_| JSearchError::InvalidApiKey)?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("X-RapidAPI-Key", key);
        headers.insert("X-RapidAPI-Host", HeaderValue::from_static(JSEARCH_HOST));
        Ok(headers)
    }

    /// Run a single search. Returns the raw listing items under `data`.
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let url = format!("{}/search", self.base_url);
        tracing::debug!(query = %request.query, page = request.page, "JSearch request");

        let resp = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .query(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(JSearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        let response: SearchResponse = serde_json::from_str(&body)?;
        tracing::debug!(
            query = %request.query,
            count = response.data.len(),
            "JSearch response"
        );

        Ok(response)
    }
}
