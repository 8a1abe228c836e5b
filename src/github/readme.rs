// src/github/readme.rs
// =============================================================================
// This module fetches a repository's README.md from the raw-content host.
//
// Strategy:
// - Request "{raw_base}/{owner}/{repo}/{branch}/README.md"
// - Try the configured branches in order (main, then master by default)
// - Only a 404 moves on to the next branch; anything else is final
//
// The outcome is never an error: a missing or unreachable README becomes a
// fixed placeholder sentence in the report.
// =============================================================================

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::fetch::{endpoint, Fetcher};
use crate::config::ScrapeConfig;

pub const README_NOT_FOUND: &str = "README not found or inaccessible.";
pub const README_FETCH_FAILED: &str = "README fetch failed due to connectivity error.";

/// What happened when we looked for a README.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadmeOutcome {
    /// Body of README.md, trimmed, and the branch it came from.
    Found { branch: String, content: String },
    NotFound,
    FetchFailed,
}

impl ReadmeOutcome {
    // Text that goes into the report for this outcome
    pub fn text(&self) -> &str {
        match self {
            ReadmeOutcome::Found { content, .. } => content.as_str(),
            ReadmeOutcome::NotFound => README_NOT_FOUND,
            ReadmeOutcome::FetchFailed => README_FETCH_FAILED,
        }
    }
}

// Resolves the README of `full_name` ("owner/repo").
//
// At most one request per configured branch is made, in order.
pub async fn fetch_readme(fetcher: &Fetcher, config: &ScrapeConfig, full_name: &str) -> ReadmeOutcome {
    info!(repo = full_name, "Attempting README fetch");

    let mut segments: Vec<&str> = full_name.split('/').collect();
    let path_len = segments.len();

    for branch in config.branches() {
        segments.truncate(path_len);
        segments.extend([branch.as_str(), "README.md"]);
        let url = endpoint(config.raw_base(), &segments);

        let response = match fetcher
            .get(&url, config.readme_delay(), Some(config.readme_timeout()))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(repo = full_name, branch = %branch, error = %e, "README fetch failed");
                return ReadmeOutcome::FetchFailed;
            }
        };

        match response.status() {
            StatusCode::OK => {
                return match response.text().await {
                    Ok(body) => ReadmeOutcome::Found {
                        branch: branch.clone(),
                        content: body.trim().to_string(),
                    },
                    Err(e) => {
                        warn!(repo = full_name, branch = %branch, error = %e, "README body could not be read");
                        ReadmeOutcome::FetchFailed
                    }
                };
            }
            StatusCode::NOT_FOUND => {
                debug!(repo = full_name, branch = %branch, "No README on branch");
            }
            status => {
                debug!(repo = full_name, branch = %branch, %status, "README not accessible");
                return ReadmeOutcome::NotFound;
            }
        }
    }

    ReadmeOutcome::NotFound
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why does only a 404 move on to the next branch?
//    - raw.githubusercontent.com answers 404 when the branch or the file
//      does not exist, so "main" missing usually means the repo uses "master"
//    - Any other status (403, 429, 5xx) says nothing about the branch name,
//      so trying another branch would just repeat the same failure
//
// 2. Why a for loop instead of calling fetch_readme again?
//    - The number of requests is bounded by config.branches().len()
//    - Every exit is an explicit `return`, falling through means "all 404"
//
// 3. What makes a request "fail" rather than "not found"?
//    - reqwest returns Err for connection errors and for the per-request
//      timeout (config.readme_timeout()); both become FetchFailed
//    - A response with any status, even 500, is a response: NotFound
// -----------------------------------------------------------------------------
