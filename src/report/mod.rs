// src/report/mod.rs
// =============================================================================
// This module builds the report file.
//
// Submodules:
// - markdown: Turns repositories and their READMEs into Markdown text
//
// write_report() fetches the README of every repository in order, renders
// the document and writes it to "{profile}_github_projects_data.md" in the
// configured output directory. The file is written even when there are no
// repositories, so every run leaves a report behind.
// =============================================================================

mod markdown;

use std::path::PathBuf;

use tracing::info;

use crate::config::ScrapeConfig;
use crate::github::{fetch_readme, Fetcher, ReadmeOutcome, RepositoryRef};

pub use markdown::render_report;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A report that has been written to disk.
#[derive(Debug)]
pub struct Report {
    pub path: PathBuf,
    /// Every repository with its README outcome, in report order.
    pub entries: Vec<(RepositoryRef, ReadmeOutcome)>,
}

pub fn report_file_name(profile: &str) -> String {
    format!("{}_github_projects_data.md", profile)
}

// Resolves every README, renders the report and writes it.
//
// README problems never fail this function; they show up as placeholder
// text. Only a failed file write is an error.
pub async fn write_report(
    fetcher: &Fetcher,
    config: &ScrapeConfig,
    repositories: &[RepositoryRef],
) -> Result<Report, ReportError> {
    let profile = config.profile();

    if !repositories.is_empty() {
        info!(count = repositories.len(), "Starting README fetching and Markdown export");
    }

    let mut entries = Vec::with_capacity(repositories.len());
    for repo in repositories {
        let readme = fetch_readme(fetcher, config, repo.full_name()).await;
        entries.push((repo.clone(), readme));
    }

    let content = render_report(profile, &entries);
    let path = config.output_dir().join(report_file_name(profile));

    tokio::fs::write(&path, content)
        .await
        .map_err(|source| ReportError::Write {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), "Exported project data");

    Ok(Report { path, entries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::profile_tests::{listing_html, NEXT_DISABLED};
    use crate::github::collect_repositories;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer, dir: &std::path::Path) -> ScrapeConfig {
        ScrapeConfig::new("octocat")
            .unwrap()
            .with_github_base(&server.uri())
            .unwrap()
            .with_raw_base(&server.uri())
            .unwrap()
            .with_delays(Duration::ZERO, Duration::ZERO)
            .with_output_dir(dir)
    }

    async fn mount_readme(server: &MockServer, full_path: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(full_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(server)
            .await;
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(report_file_name("octocat"), "octocat_github_projects_data.md");
    }

    #[tokio::test]
    async fn test_empty_report_is_persisted() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let fetcher = Fetcher::new(&config).unwrap();

        let report = write_report(&fetcher, &config, &[]).await.unwrap();

        assert_eq!(report.path, dir.path().join("octocat_github_projects_data.md"));
        assert!(report.entries.is_empty());
        let written = std::fs::read_to_string(&report.path).unwrap();
        assert!(written.contains("No projects were found to summarize."));
    }

    #[tokio::test]
    async fn test_end_to_end_report() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_html(
                &["/octocat/alpha", "/octocat/beta", "/octocat/gamma"],
                NEXT_DISABLED,
            )))
            .mount(&server)
            .await;
        mount_readme(&server, "/octocat/alpha/main/README.md", 200, "  Alpha docs  ").await;
        mount_readme(&server, "/octocat/beta/main/README.md", 404, "").await;
        mount_readme(&server, "/octocat/beta/master/README.md", 200, "Beta docs").await;
        // gamma has no README on either branch; wiremock answers 404 by default

        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let fetcher = Fetcher::new(&config).unwrap();

        let collection = collect_repositories(&fetcher, &config).await;
        let report = write_report(&fetcher, &config, &collection.repositories)
            .await
            .unwrap();
        let written = std::fs::read_to_string(&report.path).unwrap();

        assert!(written.contains("Total Public Repositories Scraped: 3\n"));
        let alpha = written.find("## 1. Project: alpha").unwrap();
        let beta = written.find("## 2. Project: beta").unwrap();
        let gamma = written.find("## 3. Project: gamma").unwrap();
        assert!(alpha < beta && beta < gamma);
        assert!(written.contains("```markdown\nAlpha docs\n```"));
        assert!(written.contains("```markdown\nBeta docs\n```"));
        assert!(written.contains("```markdown\nREADME not found or inaccessible.\n```"));
        assert!(written.contains(&format!("**URL:** {}/octocat/alpha", server.uri())));
    }

    #[tokio::test]
    async fn test_writing_twice_is_byte_identical() {
        let server = MockServer::start().await;
        mount_readme(&server, "/octocat/alpha/main/README.md", 200, "Alpha docs").await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, dir.path());
        let fetcher = Fetcher::new(&config).unwrap();

        let base = url::Url::parse(&server.uri()).unwrap();
        let repos = vec![
            RepositoryRef::from_href("octocat", "/octocat/alpha", &base).unwrap(),
            RepositoryRef::from_href("octocat", "/octocat/beta", &base).unwrap(),
        ];

        let first = write_report(&fetcher, &config, &repos).await.unwrap();
        let first_bytes = std::fs::read(&first.path).unwrap();
        let second = write_report(&fetcher, &config, &repos).await.unwrap();
        let second_bytes = std::fs::read(&second.path).unwrap();

        assert_eq!(first.path, second.path);
        assert_eq!(first_bytes, second_bytes);
    }

    #[tokio::test]
    async fn test_unwritable_output_dir() {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&server, &dir.path().join("missing"));
        let fetcher = Fetcher::new(&config).unwrap();

        let result = write_report(&fetcher, &config, &[]).await;
        assert!(matches!(result, Err(ReportError::Write { .. })));
    }
}
