// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Collect the profile's repositories, then fetch READMEs and write the report
// 4. Print a summary and exit
//
// Exit codes:
//   0 = the run finished (even if pages or READMEs could not be fetched)
//   2 = internal error (bad configuration, report could not be written)
//
// Rust concepts:
// - async/await: reqwest is async, but every request is awaited in turn
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - run configuration
mod github;   // src/github/ - listing pages and README fetching
mod logging;  // src/logging.rs - tracing setup
mod report;   // src/report/ - Markdown rendering and file output

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{error, info};

use cli::Cli;
use github::{Fetcher, ReadmeOutcome, RepositoryRef, StopReason};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_level) {
        eprintln!("Error: {:#}", e);
        std::process::exit(2);
    }

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let json = cli.json;
    let config = cli.into_config().context("invalid configuration")?;
    let fetcher = Fetcher::new(&config).context("failed to set up HTTP client")?;

    let collection = github::collect_repositories(&fetcher, &config).await;
    if collection.repositories.is_empty() {
        info!("No repositories to process; writing an empty report");
    }

    let report = report::write_report(&fetcher, &config, &collection.repositories)
        .await
        .context("failed to export report")?;

    let summary = RunSummary::new(
        config.profile(),
        collection.pages_fetched,
        collection.stop,
        report.path,
        &report.entries,
    );
    print_results(&summary, json)?;

    Ok(0)
}

/// README status of one repository, as shown in the summary.
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "readme", rename_all = "snake_case")]
enum ReadmeStatus {
    Found { branch: String },
    NotFound,
    FetchFailed,
}

impl From<&ReadmeOutcome> for ReadmeStatus {
    fn from(outcome: &ReadmeOutcome) -> Self {
        match outcome {
            ReadmeOutcome::Found { branch, .. } => ReadmeStatus::Found {
                branch: branch.clone(),
            },
            ReadmeOutcome::NotFound => ReadmeStatus::NotFound,
            ReadmeOutcome::FetchFailed => ReadmeStatus::FetchFailed,
        }
    }
}

#[derive(Debug, Serialize)]
struct RepositorySummary {
    #[serde(flatten)]
    repository: RepositoryRef,
    #[serde(flatten)]
    readme: ReadmeStatus,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    profile: String,
    pages_fetched: u32,
    stop: StopReason,
    report: PathBuf,
    readmes_found: usize,
    readmes_missing: usize,
    readmes_failed: usize,
    repositories: Vec<RepositorySummary>,
}

impl RunSummary {
    fn new(
        profile: &str,
        pages_fetched: u32,
        stop: StopReason,
        report: PathBuf,
        entries: &[(RepositoryRef, ReadmeOutcome)],
    ) -> Self {
        let repositories: Vec<RepositorySummary> = entries
            .iter()
            .map(|(repo, outcome)| RepositorySummary {
                repository: repo.clone(),
                readme: ReadmeStatus::from(outcome),
            })
            .collect();

        let count = |wanted: fn(&ReadmeStatus) -> bool| {
            repositories.iter().filter(|r| wanted(&r.readme)).count()
        };

        Self {
            profile: profile.to_string(),
            pages_fetched,
            stop,
            report,
            readmes_found: count(|s| matches!(s, ReadmeStatus::Found { .. })),
            readmes_missing: count(|s| *s == ReadmeStatus::NotFound),
            readmes_failed: count(|s| *s == ReadmeStatus::FetchFailed),
            repositories,
        }
    }
}

// Prints the summary either as a table or JSON
fn print_results(summary: &RunSummary, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(summary)?;
        println!("{}", json_output);
    } else {
        print_table(summary);
    }
    Ok(())
}

fn print_table(summary: &RunSummary) {
    println!("{:<40} {:<20}", "REPOSITORY", "README");
    println!("{}", "=".repeat(60));

    for repo in &summary.repositories {
        let name = repo.repository.full_name();
        let name_display = if name.chars().count() > 37 {
            format!("{}...", name.chars().take(37).collect::<String>())
        } else {
            name.to_string()
        };
        println!("{:<40} {:<20}", name_display, format_status(&repo.readme));
    }

    println!();
    println!("📊 Summary for @{}:", summary.profile);
    println!("   📄 Pages fetched: {}", summary.pages_fetched);
    println!("   🛑 Stopped: {}", format_stop(&summary.stop));
    println!("   ✅ READMEs found: {}", summary.readmes_found);
    println!("   ❔ READMEs missing: {}", summary.readmes_missing);
    println!("   ❌ READMEs failed: {}", summary.readmes_failed);
    println!("   📝 Report: {}", summary.report.display());
}

fn format_status(status: &ReadmeStatus) -> String {
    match status {
        ReadmeStatus::Found { branch } => format!("✅ {}", branch),
        ReadmeStatus::NotFound => "❔ NOT FOUND".to_string(),
        ReadmeStatus::FetchFailed => "❌ FETCH FAILED".to_string(),
    }
}

fn format_stop(stop: &StopReason) -> String {
    match stop {
        StopReason::FetchFailed { page } => format!("page {} could not be fetched", page),
        StopReason::ProfileNotFound => "profile not found".to_string(),
        StopReason::NoRepositories => "profile has no repositories".to_string(),
        StopReason::EmptyPage { page } => format!("page {} listed no repositories", page),
        StopReason::LastPage { page } => format!("last page ({})", page),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn repo(name: &str) -> RepositoryRef {
        let base = Url::parse("https://github.com").unwrap();
        RepositoryRef::from_href("octocat", &format!("/octocat/{}", name), &base).unwrap()
    }

    fn sample_summary() -> RunSummary {
        let entries = vec![
            (
                repo("alpha"),
                ReadmeOutcome::Found {
                    branch: "master".to_string(),
                    content: "docs".to_string(),
                },
            ),
            (repo("beta"), ReadmeOutcome::NotFound),
            (repo("gamma"), ReadmeOutcome::FetchFailed),
            (repo("delta"), ReadmeOutcome::NotFound),
        ];
        RunSummary::new(
            "octocat",
            2,
            StopReason::LastPage { page: 2 },
            PathBuf::from("octocat_github_projects_data.md"),
            &entries,
        )
    }

    #[test]
    fn test_summary_counts() {
        let summary = sample_summary();
        assert_eq!(summary.readmes_found, 1);
        assert_eq!(summary.readmes_missing, 2);
        assert_eq!(summary.readmes_failed, 1);
        assert_eq!(summary.repositories.len(), 4);
    }

    #[test]
    fn test_summary_json_shape() {
        let value = serde_json::to_value(sample_summary()).unwrap();

        assert_eq!(value["profile"], "octocat");
        assert_eq!(value["stop"]["reason"], "last_page");
        assert_eq!(value["stop"]["page"], 2);
        let first = &value["repositories"][0];
        assert_eq!(first["full_name"], "octocat/alpha");
        assert_eq!(first["url"], "https://github.com/octocat/alpha");
        assert_eq!(first["readme"], "found");
        assert_eq!(first["branch"], "master");
        assert_eq!(value["repositories"][1]["readme"], "not_found");
    }

    #[test]
    fn test_format_stop() {
        assert_eq!(format_stop(&StopReason::ProfileNotFound), "profile not found");
        assert_eq!(
            format_stop(&StopReason::FetchFailed { page: 4 }),
            "page 4 could not be fetched"
        );
    }
}
