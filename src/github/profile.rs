// src/github/profile.rs
// =============================================================================
// This module collects the repositories listed on a GitHub profile.
//
// How it works:
// 1. Fetch "{profile}?tab=repositories&page=N", starting at page 1
// 2. Pull the repository links out of the HTML with CSS selectors
// 3. Keep only links that point at "/{profile}/{repo}"
// 4. Follow the "next page" control until it is missing or disabled
//
// The loop also stops when a page fails to load or lists no repositories.
// Whatever was collected before the stop is kept.
//
// Rust concepts:
// - LazyLock: Compile each CSS selector once, on first use
// - Enums with data: StopReason records why and where collection ended
// - Private fields + getters: RepositoryRef can't be changed after parsing
// =============================================================================

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use super::fetch::{endpoint, Fetcher};
use crate::config::ScrapeConfig;

// The selectors are constants, so a parse failure is a programmer error
static REPO_LINK: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"h3 a[itemprop="name codeRepository"]"#).expect("valid selector")
});
static PROFILE_NAME: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1.vcard-names span.p-name").expect("valid selector"));
static NEXT_PAGE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".next_page").expect("valid selector"));

/// A repository found on a listing page.
///
/// `full_name` is always `{profile}/{name}` with a non-empty `name`;
/// [`RepositoryRef::from_href`] refuses to build anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRef {
    name: String,
    url: String,
    full_name: String,
}

impl RepositoryRef {
    // Builds a reference from a listing href such as "/octocat/hello-world".
    //
    // Returns None when the href is not rooted at "/{profile}/" or does not
    // name exactly one repository below it.
    pub fn from_href(profile: &str, href: &str, github_base: &Url) -> Option<Self> {
        let repo = href.strip_prefix('/')?.strip_prefix(profile)?.strip_prefix('/')?;
        let repo = repo.trim();
        if repo.is_empty() || repo.contains('/') {
            return None;
        }

        Some(Self {
            name: repo.to_string(),
            url: endpoint(github_base, &[profile, repo]).to_string(),
            full_name: format!("{}/{}", profile, repo),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

/// State of the pagination control at the bottom of a listing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    Enabled,
    Disabled,
    Missing,
}

/// Everything the collector needs from one listing page.
#[derive(Debug)]
pub struct ListingPage {
    /// Number of repository links found, before filtering by owner.
    pub matched: usize,
    pub repositories: Vec<RepositoryRef>,
    pub next: NextPage,
    /// Display name shown in the profile header, if any.
    pub profile_name: Option<String>,
}

impl ListingPage {
    pub fn parse(html: &str, profile: &str, github_base: &Url) -> Self {
        let document = Html::parse_document(html);

        let links: Vec<ElementRef> = document.select(&REPO_LINK).collect();
        let repositories = links
            .iter()
            .filter_map(|link| link.value().attr("href"))
            .filter_map(|href| RepositoryRef::from_href(profile, href, github_base))
            .collect();

        let profile_name = document
            .select(&PROFILE_NAME)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string());

        let next = match document.select(&NEXT_PAGE).next() {
            None => NextPage::Missing,
            Some(el) => {
                let element = el.value();
                if element.classes().any(|class| class == "disabled")
                    || element.attr("disabled").is_some()
                {
                    NextPage::Disabled
                } else {
                    NextPage::Enabled
                }
            }
        };

        Self {
            matched: links.len(),
            repositories,
            next,
            profile_name,
        }
    }
}

/// Why collection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum StopReason {
    /// A listing page could not be fetched.
    FetchFailed { page: u32 },
    /// Page 1 had no repositories and no matching profile header.
    ProfileNotFound,
    /// Page 1 had the profile header but no repository links.
    NoRepositories,
    /// A later page had no repository links.
    EmptyPage { page: u32 },
    /// The next-page control was missing or disabled.
    LastPage { page: u32 },
}

/// Result of walking a profile's listing pages.
#[derive(Debug)]
pub struct Collection {
    pub repositories: Vec<RepositoryRef>,
    /// Pages that were fetched successfully.
    pub pages_fetched: u32,
    pub stop: StopReason,
}

// Builds "{github_base}/{profile}?tab=repositories&page={page}"
pub fn listing_url(github_base: &Url, profile: &str, page: u32) -> Url {
    let mut url = endpoint(github_base, &[profile]);
    url.query_pairs_mut()
        .append_pair("tab", "repositories")
        .append_pair("page", &page.to_string());
    url
}

// Walks the listing pages for the configured profile.
//
// Never fails: a fetch error ends the walk and the partial list is returned,
// with the reason recorded in Collection::stop.
pub async fn collect_repositories(fetcher: &Fetcher, config: &ScrapeConfig) -> Collection {
    let profile = config.profile();
    let mut repositories = Vec::new();
    let mut page: u32 = 1;
    let mut pages_fetched: u32 = 0;

    info!(profile, "Starting repository scraping");

    let stop = loop {
        let url = listing_url(config.github_base(), profile, page);

        let html = match fetcher
            .fetch_page(&url, config.page_delay(), config.page_timeout())
            .await
        {
            Ok(html) => html,
            Err(_) => {
                warn!(page, "Stopping scan: failed to fetch page");
                break StopReason::FetchFailed { page };
            }
        };
        pages_fetched += 1;

        let listing = ListingPage::parse(&html, profile, config.github_base());

        if listing.matched == 0 {
            if page > 1 {
                break StopReason::EmptyPage { page };
            }

            let profile_exists = listing
                .profile_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase() == profile.to_lowercase());
            if profile_exists {
                warn!(
                    profile,
                    "Found user profile, but no repository links; the page markup may have changed"
                );
                break StopReason::NoRepositories;
            }
            warn!(profile, "User not found or profile is inaccessible");
            break StopReason::ProfileNotFound;
        }

        info!(page, found = listing.matched, "Processing page");
        repositories.extend(listing.repositories);

        if listing.next != NextPage::Enabled {
            break StopReason::LastPage { page };
        }

        page += 1;
    };

    info!(total = repositories.len(), "Repository collection complete");

    Collection {
        repositories,
        pages_fetched,
        stop,
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. What is LazyLock?
//    - A static that runs its closure the first time it is used
//    - Selector::parse is not const, so the selectors can't be plain statics
//    - Every later ListingPage::parse reuses the compiled selector
//
// 2. Why count `matched` separately from `repositories`?
//    - A page of forks or links to other owners has matches but nothing we
//      keep; that is still a real page, so pagination continues
//    - Only a page with no repository links at all ends the walk
//
// 3. Why does `loop` return a value?
//    - `break StopReason::...` hands the reason out of the loop, so every
//      exit path has to say why it stopped
//
// 4. Why is the href check stricter than starts_with("/{profile}/")?
//    - "/octo/..." must not match profile "oct", and "/octocat/a/tree/main"
//      is not a repository; from_href rejects both
// -----------------------------------------------------------------------------
