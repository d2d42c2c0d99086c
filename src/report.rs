//! Markdown findings report and the matching severity counts.

use crate::github::issues::GitHubIssue;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "source";
pub const REPORT_FILENAME: &str = "report.md";
pub const SEVERITY_COUNTS_FILENAME: &str = "severity_counts.conf";

/// Severity buckets in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
    GasOptimization,
    Unclassified,
}

impl Severity {
    pub fn all() -> &'static [Severity] {
        &[
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
            Severity::Informational,
            Severity::GasOptimization,
            Severity::Unclassified,
        ]
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical Risk",
            Severity::High => "High Risk",
            Severity::Medium => "Medium Risk",
            Severity::Low => "Low Risk",
            Severity::Informational => "Informational",
            Severity::GasOptimization => "Gas Optimization",
            Severity::Unclassified => "Unclassified",
        }
    }

    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Critical => "C",
            Severity::High => "H",
            Severity::Medium => "M",
            Severity::Low => "L",
            Severity::Informational => "I",
            Severity::GasOptimization => "G",
            Severity::Unclassified => "U",
        }
    }

    /// Maps a label such as `High Risk` or `gas` to a severity.
    pub fn from_label(label: &str) -> Option<Severity> {
        let label = label.trim().to_lowercase();
        let label = label.strip_suffix(" risk").unwrap_or(&label);
        match label {
            "critical" => Some(Severity::Critical),
            "high" => Some(Severity::High),
            "medium" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            "informational" | "info" => Some(Severity::Informational),
            "gas optimization" | "gas" => Some(Severity::GasOptimization),
            _ => None,
        }
    }
}

/// Highest severity among the issue's labels, or `Unclassified`.
pub fn classify(issue: &GitHubIssue) -> Severity {
    issue
        .labels
        .iter()
        .filter_map(|label| Severity::from_label(label))
        .min()
        .unwrap_or(Severity::Unclassified)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub informational: usize,
    pub gas_optimization: usize,
    pub total: usize,
}

impl SeverityCounts {
    pub fn from_issues(issues: &[GitHubIssue]) -> Self {
        issues.iter().fold(SeverityCounts::default(), |mut counts, issue| {
            match classify(issue) {
                Severity::Critical => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low => counts.low += 1,
                Severity::Informational => counts.informational += 1,
                Severity::GasOptimization => counts.gas_optimization += 1,
                Severity::Unclassified => {}
            }
            counts.total += 1;
            counts
        })
    }

    pub fn render(&self) -> String {
        format!(
            "critical = {}\nhigh = {}\nmedium = {}\nlow = {}\ninformational = {}\ngas_optimization = {}\ntotal = {}\n",
            self.critical,
            self.high,
            self.medium,
            self.low,
            self.informational,
            self.gas_optimization,
            self.total
        )
    }
}

/// Renders the findings section, grouped by severity and numbered per group.
pub fn render_report(issues: &[GitHubIssue]) -> String {
    let mut report = String::from("# Findings\n");

    for severity in Severity::all() {
        let group: Vec<&GitHubIssue> = issues
            .iter()
            .filter(|issue| classify(issue) == *severity)
            .collect();
        if group.is_empty() {
            continue;
        }

        report.push_str(&format!("\n## {}\n", severity.heading()));
        for (index, issue) in group.iter().enumerate() {
            report.push_str(&format!(
                "\n### [{}-{}] {}\n",
                severity.prefix(),
                index + 1,
                issue.title.trim()
            ));
            let body = issue.body.trim();
            if !body.is_empty() {
                report.push('\n');
                report.push_str(body);
                report.push('\n');
            }
        }
    }

    report
}

/// Paths of the files written by [`write_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportArtifacts {
    pub report: PathBuf,
    pub severity_counts: PathBuf,
}

pub fn write_report(output_dir: &Path, issues: &[GitHubIssue]) -> Result<ReportArtifacts> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

    let artifacts = ReportArtifacts {
        report: output_dir.join(REPORT_FILENAME),
        severity_counts: output_dir.join(SEVERITY_COUNTS_FILENAME),
    };
    fs::write(&artifacts.report, render_report(issues))
        .with_context(|| format!("Failed to write {}", artifacts.report.display()))?;
    fs::write(
        &artifacts.severity_counts,
        SeverityCounts::from_issues(issues).render(),
    )
    .with_context(|| format!("Failed to write {}", artifacts.severity_counts.display()))?;

    Ok(artifacts)
}
