// src/github/fetch.rs
// =============================================================================
// This module issues the HTTP requests for the rest of the crate.
//
// Strategy:
// - One reqwest Client per run, carrying the configured header set
// - Every request waits a fixed pacing delay first
// - No retries: a failed request is reported once and the caller decides
//
// Rust concepts:
// - async functions: For network I/O
// - thiserror: A typed error enum instead of anyhow inside the library code
// - Option<Duration>: Listing pages have no timeout unless one is configured
// =============================================================================

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::config::{ConfigError, ScrapeConfig};

/// Why a page could not be fetched.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Connection, timeout or body read failure.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
}

// Thin wrapper around reqwest that applies pacing and the shared headers
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    // Builds the shared client from the configured header set
    pub fn new(config: &ScrapeConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .default_headers(config.headers().clone())
            .build()?;
        Ok(Self { client })
    }

    // Sends a GET after sleeping `delay` and hands back the raw response.
    //
    // The status code is not inspected here; callers that care about
    // specific codes (like the README resolver and its 404 fallback) use this.
    pub async fn get(
        &self,
        url: &Url,
        delay: Duration,
        timeout: Option<Duration>,
    ) -> Result<Response, reqwest::Error> {
        tokio::time::sleep(delay).await;

        let mut request = self.client.get(url.clone());
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        debug!(%url, "GET");
        request.send().await
    }

    // Fetches a page and returns its body as text.
    //
    // Returns: the body on any 2xx status, FetchError otherwise.
    // Failures are logged here so callers only need to decide whether to stop.
    pub async fn fetch_page(
        &self,
        url: &Url,
        delay: Duration,
        timeout: Option<Duration>,
    ) -> Result<String, FetchError> {
        let result = self.fetch_page_inner(url, delay, timeout).await;
        if let Err(e) = &result {
            warn!(error = %e, "Error fetching page");
        }
        result
    }

    async fn fetch_page_inner(
        &self,
        url: &Url,
        delay: Duration,
        timeout: Option<Duration>,
    ) -> Result<String, FetchError> {
        let network = |source: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.get(url, delay, timeout).await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(network)
    }
}

// Appends path segments to a base URL, keeping any path the base already has.
//
// Example:
//   base = "http://localhost:8080/raw", segments = ["octocat", "hello"]
//   -> "http://localhost:8080/raw/octocat/hello"
pub fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}
