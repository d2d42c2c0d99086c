use crate::cli;
use crate::config;
use crate::credentials::{self, TokenSource};
use crate::filter;
use crate::github::graphql::{DEFAULT_GRAPHQL_URL, HttpGraphQlExecutor};
use crate::github::issues;
use crate::output;
use crate::report;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::info;

mod endpoints {
    pub const GRAPHQL_ENV_VAR: &str = "GITHUB_GRAPHQL_URL";
    pub const API_ENV_VAR: &str = "GITHUB_API_URL";
}

pub async fn run(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    match cli::parser::parse_args(&args) {
        cli::parser::Command::Fetch { config } => {
            let session = Session::open(config.as_deref(), &credentials::EnvTokenSource::new())?;
            let filter = session.collect_filter(&mut stdout_additional).await?;

            output::println(
                &format!("Fetching issues from repository {} with filters...", session.settings.repository),
                &mut stdout_additional,
            )?;
            let repository = &session.settings.repository;
            let client = &session.client;
            let api_url = session.api_url.as_str();
            let token = session.token.as_str();
            let all_issues = issues::fetch_github_issues(move |page, per_page| {
                issues::request_issue_page(client, api_url, token, repository, page, per_page)
            })
            .await
            .with_context(|| format!("Failed to fetch issues of {repository}"))?;

            let selected = issues::apply_filter(all_issues, &filter);
            let artifacts = report::write_report(Path::new(report::DEFAULT_OUTPUT_DIR), &selected)?;
            info!(
                report = %artifacts.report.display(),
                severity_counts = %artifacts.severity_counts.display(),
                "Report artifacts written"
            );

            let summary = if selected.is_empty() {
                "Done. No issues obtained.".to_string()
            } else {
                format!("Done. {} issues obtained.", selected.len())
            };
            output::println(&summary, &mut stdout_additional)?;
        }
        cli::parser::Command::Filter { config } => {
            let session = Session::open(config.as_deref(), &credentials::EnvTokenSource::new())?;
            let filter = session.collect_filter(&mut stdout_additional).await?;
            output::println(&filter.to_string(), &mut stdout_additional)?;
        }
        cli::parser::Command::Help => {
            output::println(cli::parser::USAGE, &mut stdout_additional)?;
        }
        cli::parser::Command::Unknown(cmd) => {
            return Err(anyhow::anyhow!(
                "Unknown command: {cmd}. Use `audit-report help` for usage."
            ));
        }
    }
    Ok(())
}

/// Everything a command needs to talk to GitHub for one configured repository.
struct Session {
    settings: config::ReportSettings,
    client: reqwest::Client,
    graphql_url: String,
    api_url: String,
    token: String,
}

impl Session {
    fn open<S: TokenSource>(config_path: Option<&str>, token_source: &S) -> anyhow::Result<Self> {
        let path = config_path
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);
        let settings = load_settings(&path)?;
        let token = credentials::require_token(token_source, credentials::TOKEN_ENV_VAR)?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Session {
            settings,
            client,
            graphql_url: std::env::var(endpoints::GRAPHQL_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.to_string()),
            api_url: std::env::var(endpoints::API_ENV_VAR)
                .unwrap_or_else(|_| issues::DEFAULT_API_URL.to_string()),
            token,
        })
    }

    async fn collect_filter(
        &self,
        stdout_additional: &mut Option<&mut dyn std::io::Write>,
    ) -> anyhow::Result<filter::FilterSpecification> {
        let repository = &self.settings.repository;
        output::println(
            &format!(
                "Extracted owner: {}, repo: {}",
                repository.owner, repository.name
            ),
            stdout_additional,
        )?;

        let executor =
            HttpGraphQlExecutor::new(self.client.clone(), self.graphql_url.as_str(), self.token.as_str());
        filter::collect_filter(&executor, &self.settings)
            .await
            .with_context(|| format!("Failed to filter issues of {repository} by project column"))
    }
}

pub fn default_config_path() -> PathBuf {
    Path::new(config::PROJECT_CONFIG_DIR).join(config::PROJECT_CONFIG_FILENAME)
}

/// Reads and interprets the configuration file at `path`.
pub fn load_settings(path: &Path) -> anyhow::Result<config::ReportSettings> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config_map = config::parse_config(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    config::report_settings(&config_map)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}
