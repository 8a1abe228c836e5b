// src/config.rs
// =============================================================================
// This module holds the run configuration.
//
// Everything the scraper needs to know is carried by one ScrapeConfig value
// that is passed into each component:
// - which profile to scrape
// - where the listing pages and raw README files live
// - which headers to send
// - how long to wait before each request
// - which branches to try when looking for a README
// - where to write the report
//
// Rust concepts:
// - Builder methods: with_* consume self and return the modified value
// - thiserror: Derives std::error::Error for our error enum
// =============================================================================

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use url::Url;

pub const DEFAULT_GITHUB_URL: &str = "https://github.com";
pub const DEFAULT_RAW_URL: &str = "https://raw.githubusercontent.com";

const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Errors raised while building a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("profile name must not be empty")]
    EmptyProfile,

    #[error("profile name '{0}' must not contain '/'")]
    InvalidProfile(String),

    #[error("invalid header '{0}': expected 'Name: value'")]
    InvalidHeader(String),

    #[error("invalid base URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL '{0}' cannot carry a path")]
    NotABaseUrl(String),

    #[error("at least one README branch is required")]
    NoBranches,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Configuration for one scraping run.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Profile whose repositories are collected.
    profile: String,
    /// Base URL of the profile site (listing pages and repository links).
    github_base: Url,
    /// Base URL of the raw-content host serving README files.
    raw_base: Url,
    /// Headers sent with every request.
    headers: HeaderMap,
    /// Pause before each listing page request.
    page_delay: Duration,
    /// Pause before each README request.
    readme_delay: Duration,
    /// Timeout for listing page requests; none by default.
    page_timeout: Option<Duration>,
    /// Timeout for README requests.
    readme_timeout: Duration,
    /// README branches, tried in order.
    branches: Vec<String>,
    /// Directory the report is written to.
    output_dir: PathBuf,
}

impl ScrapeConfig {
    /// Creates a configuration with default endpoints, headers and delays.
    pub fn new(profile: impl Into<String>) -> Result<Self, ConfigError> {
        let profile = profile.into().trim().to_string();
        if profile.is_empty() {
            return Err(ConfigError::EmptyProfile);
        }
        if profile.contains('/') {
            return Err(ConfigError::InvalidProfile(profile));
        }

        Ok(Self {
            profile,
            github_base: parse_base(DEFAULT_GITHUB_URL)?,
            raw_base: parse_base(DEFAULT_RAW_URL)?,
            headers: default_headers(),
            page_delay: Duration::from_secs(1),
            readme_delay: Duration::from_millis(500),
            page_timeout: None,
            readme_timeout: Duration::from_secs(10),
            branches: vec!["main".to_string(), "master".to_string()],
            output_dir: PathBuf::from("."),
        })
    }

    pub fn with_github_base(mut self, url: &str) -> Result<Self, ConfigError> {
        self.github_base = parse_base(url)?;
        Ok(self)
    }

    pub fn with_raw_base(mut self, url: &str) -> Result<Self, ConfigError> {
        self.raw_base = parse_base(url)?;
        Ok(self)
    }

    /// Adds a header given as `Name: value`, replacing any default of the same name.
    pub fn with_header(mut self, raw: &str) -> Result<Self, ConfigError> {
        let (name, value) = parse_header(raw)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn with_delays(mut self, page_delay: Duration, readme_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self.readme_delay = readme_delay;
        self
    }

    pub fn with_page_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.page_timeout = timeout;
        self
    }

    pub fn with_readme_timeout(mut self, timeout: Duration) -> Self {
        self.readme_timeout = timeout;
        self
    }

    pub fn with_branches(mut self, branches: Vec<String>) -> Result<Self, ConfigError> {
        let branches: Vec<String> = branches
            .into_iter()
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .collect();
        if branches.is_empty() {
            return Err(ConfigError::NoBranches);
        }
        self.branches = branches;
        Ok(self)
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn github_base(&self) -> &Url {
        &self.github_base
    }

    pub fn raw_base(&self) -> &Url {
        &self.raw_base
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    pub fn readme_delay(&self) -> Duration {
        self.readme_delay
    }

    pub fn page_timeout(&self) -> Option<Duration> {
        self.page_timeout
    }

    pub fn readme_timeout(&self) -> Duration {
        self.readme_timeout
    }

    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,text/plain;q=0.9,*/*;q=0.8"),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
    headers
}

// Base URLs are stored without a trailing slash so joining paths never doubles it
fn parse_base(url: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(url.trim_end_matches('/')).map_err(|source| ConfigError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    if parsed.cannot_be_a_base() {
        return Err(ConfigError::NotABaseUrl(url.to_string()));
    }
    Ok(parsed)
}

fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), ConfigError> {
    let invalid = || ConfigError::InvalidHeader(raw.to_string());

    let (name, value) = raw.split_once(':').ok_or_else(invalid)?;
    let name = HeaderName::from_bytes(name.trim().as_bytes()).map_err(|_| invalid())?;
    let value = HeaderValue::from_str(value.trim()).map_err(|_| invalid())?;
    Ok((name, value))
}
