// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: scrape one profile and write its report.
// Every flag has a default, so `profile-digest octocat` is a complete run.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the argument parser
// - TryFrom-style conversion: Cli::into_config() validates into ScrapeConfig
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{ConfigError, ScrapeConfig, DEFAULT_GITHUB_URL, DEFAULT_RAW_URL};

#[derive(Parser, Debug)]
#[command(
    name = "profile-digest",
    version,
    about = "Scrape a GitHub profile's repositories and compile their READMEs into one Markdown file",
    long_about = "profile-digest walks the public repository listing of a GitHub profile, \
                  fetches README.md for every repository (trying 'main', then 'master') \
                  and writes everything to {profile}_github_projects_data.md."
)]
pub struct Cli {
    /// GitHub profile (user or organization) to scrape
    #[arg(env = "PROFILE_DIGEST_PROFILE")]
    pub profile: String,

    /// Directory the report is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Pause before each listing page request, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub page_delay_ms: u64,

    /// Pause before each README request, in milliseconds
    #[arg(long, default_value_t = 500)]
    pub readme_delay_ms: u64,

    /// Timeout for each listing page request, in seconds (none by default)
    #[arg(long)]
    pub page_timeout_secs: Option<u64>,

    /// Timeout for each README request, in seconds
    #[arg(long, default_value_t = 10)]
    pub readme_timeout_secs: u64,

    /// Branch to look for README.md on; repeat to set the order
    /// (default: main, then master)
    #[arg(long = "branch", value_name = "NAME")]
    pub branches: Vec<String>,

    /// Extra request header as "Name: value"; may be repeated
    #[arg(long = "header", value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Base URL of the profile site
    #[arg(long, default_value = DEFAULT_GITHUB_URL)]
    pub github_url: String,

    /// Base URL of the raw-content host
    #[arg(long, default_value = DEFAULT_RAW_URL)]
    pub raw_url: String,

    /// Print the run summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Log filter used when RUST_LOG is not set (e.g. "debug")
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    // Validates the arguments and turns them into a run configuration
    pub fn into_config(self) -> Result<ScrapeConfig, ConfigError> {
        let mut config = ScrapeConfig::new(self.profile)?
            .with_github_base(&self.github_url)?
            .with_raw_base(&self.raw_url)?
            .with_delays(
                Duration::from_millis(self.page_delay_ms),
                Duration::from_millis(self.readme_delay_ms),
            )
            .with_page_timeout(self.page_timeout_secs.map(Duration::from_secs))
            .with_readme_timeout(Duration::from_secs(self.readme_timeout_secs))
            .with_output_dir(self.output_dir);

        if !self.branches.is_empty() {
            config = config.with_branches(self.branches)?;
        }
        for header in &self.headers {
            config = config.with_header(header)?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_arguments() {
        let cli = Cli::try_parse_from(["profile-digest", "octocat"]).unwrap();
        assert_eq!(cli.profile, "octocat");
        assert!(!cli.json);

        let config = cli.into_config().unwrap();
        assert_eq!(config.profile(), "octocat");
        assert_eq!(config.branches(), ["main", "master"]);
        assert_eq!(config.page_delay(), Duration::from_secs(1));
        assert!(config.page_timeout().is_none());
        assert_eq!(config.output_dir(), std::path::Path::new("."));
    }

    #[test]
    fn test_all_arguments() {
        let cli = Cli::try_parse_from([
            "profile-digest",
            "octocat",
            "--output-dir",
            "out",
            "--page-delay-ms",
            "0",
            "--readme-delay-ms",
            "25",
            "--readme-timeout-secs",
            "3",
            "--page-timeout-secs",
            "30",
            "--branch",
            "trunk",
            "--branch",
            "main",
            "--header",
            "X-Trace: abc",
            "--github-url",
            "http://localhost:9000",
            "--raw-url",
            "http://localhost:9001/raw",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);

        let config = cli.into_config().unwrap();
        assert_eq!(config.branches(), ["trunk", "main"]);
        assert_eq!(config.page_delay(), Duration::ZERO);
        assert_eq!(config.readme_delay(), Duration::from_millis(25));
        assert_eq!(config.readme_timeout(), Duration::from_secs(3));
        assert_eq!(config.page_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.headers()["x-trace"], "abc");
        assert_eq!(config.raw_base().as_str(), "http://localhost:9001/raw");
        assert_eq!(config.output_dir(), std::path::Path::new("out"));
    }

    #[test]
    fn test_bad_header_is_a_config_error() {
        let cli = Cli::try_parse_from(["profile-digest", "octocat", "--header", "oops"]).unwrap();
        assert!(matches!(cli.into_config(), Err(ConfigError::InvalidHeader(_))));
    }
}
