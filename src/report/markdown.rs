// src/report/markdown.rs
// =============================================================================
// This module renders the Markdown report.
//
// Layout:
//   # GitHub Project Summary for @{profile}
//   Total Public Repositories Scraped: {count}
//   ---
//   ## {i}. Project: {name}      (one section per repository, 1-based)
//   **URL:** {url}
//   ### README Content
//   ```markdown ... ```          (README text or a placeholder sentence)
//   ---
//
// Rendering is a pure function of its inputs, so the same inputs always give
// the same bytes.
// =============================================================================

use std::fmt::Write;

use crate::github::{ReadmeOutcome, RepositoryRef};

pub const NO_PROJECTS: &str = "No projects were found to summarize.";

// Renders the whole report for `profile`
pub fn render_report(profile: &str, entries: &[(RepositoryRef, ReadmeOutcome)]) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail, so the fmt::Results are ignored
    let _ = write!(out, "# GitHub Project Summary for @{}\n\n", profile);
    let _ = write!(out, "Total Public Repositories Scraped: {}\n\n", entries.len());
    out.push_str("---\n\n");

    if entries.is_empty() {
        out.push_str(NO_PROJECTS);
        out.push('\n');
        return out;
    }

    for (i, (repo, readme)) in entries.iter().enumerate() {
        render_section(&mut out, i + 1, repo, readme.text());
    }

    out
}

fn render_section(out: &mut String, index: usize, repo: &RepositoryRef, readme: &str) {
    let fence = fence_for(readme);

    let _ = writeln!(out, "## {}. Project: {}", index, repo.name());
    let _ = write!(out, "**URL:** {}\n\n", repo.url());
    out.push_str("### README Content\n");
    let _ = write!(out, "{}markdown\n{}\n{}\n\n", fence, readme, fence);
    out.push_str("---\n\n");
}

// Picks a backtick fence longer than any backtick run inside `content`.
//
// READMEs are full of ``` blocks of their own; a longer outer fence keeps
// them from closing the report's block early.
fn fence_for(content: &str) -> String {
    let longest = content
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}
