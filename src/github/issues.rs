use crate::filter::FilterSpecification;
use anyhow::Result;
use std::future::Future;

/// GitHub REST API root used when `GITHUB_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const ISSUES_PER_PAGE: u32 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct GitHubIssue {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub state: IssueState,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum IssueState {
    Open,
    Closed,
}

pub fn parse_github_issues(issues_json: &[serde_json::Value]) -> Vec<GitHubIssue> {
    issues_json
        .iter()
        .filter(|issue| issue["pull_request"].is_null())
        .filter_map(|issue| {
            let (Some(number), Some(title), Some(state)) = (
                issue["number"].as_u64(),
                issue["title"].as_str(),
                issue["state"].as_str(),
            ) else {
                return None;
            };
            let state = match state {
                "open" => IssueState::Open,
                "closed" => IssueState::Closed,
                _ => return None,
            };
            let labels = issue["labels"]
                .as_array()
                .map(|labels| {
                    labels
                        .iter()
                        .filter_map(|label| label["name"].as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default();

            Some(GitHubIssue {
                number,
                title: title.to_string(),
                body: issue["body"].as_str().unwrap_or_default().to_string(),
                state,
                labels,
            })
        })
        .collect()
}

/// Fetches every issue of a repository, one page at a time, until an empty page.
///
/// `issue_fetcher(page, per_page)` returns the raw JSON entries of one page.
pub async fn fetch_github_issues<F, Fut>(issue_fetcher: F) -> Result<Vec<GitHubIssue>>
where
    F: Fn(u32, u32) -> Fut,
    Fut: Future<Output = Result<Vec<serde_json::Value>>>,
{
    let mut all_issues = Vec::new();
    let mut page = 1;

    loop {
        let issues_json = issue_fetcher(page, ISSUES_PER_PAGE).await?;

        if issues_json.is_empty() {
            break;
        }

        all_issues.extend(parse_github_issues(&issues_json));
        page += 1;
    }

    Ok(all_issues)
}

/// Keeps the issues admitted by `filter`, ordered by issue number.
pub fn apply_filter(issues: Vec<GitHubIssue>, filter: &FilterSpecification) -> Vec<GitHubIssue> {
    let mut selected: Vec<GitHubIssue> = issues
        .into_iter()
        .filter(|issue| filter.matches(issue.number, issue.labels.iter().map(String::as_str)))
        .collect();
    selected.sort_by_key(|issue| issue.number);
    selected
}

/// Requests one page of `GET /repos/{owner}/{repo}/issues`, including closed issues.
pub async fn request_issue_page(
    client: &reqwest::Client,
    api_url: &str,
    token: &str,
    repository: &crate::repository::RepositoryRef,
    page: u32,
    per_page: u32,
) -> Result<Vec<serde_json::Value>> {
    let url = format!(
        "{}/repos/{}/{}/issues",
        api_url.trim_end_matches('/'),
        repository.owner,
        repository.name
    );
    let response = client
        .get(&url)
        .bearer_auth(token)
        .header("Accept", "application/vnd.github+json")
        .header("User-Agent", "audit-report-cli")
        .query(&[
            ("state", "all".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(anyhow::anyhow!(
            "Failed to fetch issues of {}: HTTP {}",
            repository,
            response.status()
        ));
    }

    Ok(response.json::<Vec<serde_json::Value>>().await?)
}
