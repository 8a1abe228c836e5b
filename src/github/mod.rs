// src/github/mod.rs
// =============================================================================
// This module talks to GitHub.
//
// Currently implements:
// - fetch: the shared HTTP client with pacing delays
// - profile: walking a profile's paginated repository listing
// - readme: fetching README.md with a branch fallback
//
// No API token is used: listing pages are scraped from the public HTML and
// README files come from raw.githubusercontent.com.
// =============================================================================

mod fetch;
mod profile;
mod readme;

pub use fetch::Fetcher;
pub use profile::{collect_repositories, RepositoryRef, StopReason};
pub use readme::{fetch_readme, ReadmeOutcome};

#[cfg(test)]
pub(crate) use profile::tests as profile_tests;
