use crate::config::{ProjectNumber, ReportSettings};
use crate::github::errors::ResolveError;
use crate::github::graphql::GraphQlExecutor;
use crate::github::{owner, project};
use crate::repository::RepositoryRef;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{info, warn};

/// Which issues end up in the report.
///
/// `issue_ids: None` admits every issue number; `Some(vec![])` admits none.
/// When both parts are set an issue has to satisfy both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpecification {
    pub issue_ids: Option<Vec<u64>>,
    pub label: Option<String>,
}

impl FilterSpecification {
    pub fn matches<'a>(&self, number: u64, mut labels: impl Iterator<Item = &'a str>) -> bool {
        let id_ok = self
            .issue_ids
            .as_ref()
            .is_none_or(|ids| ids.contains(&number));
        let label_ok = self
            .label
            .as_deref()
            .is_none_or(|wanted| labels.any(|l| l == wanted));
        id_ok && label_ok
    }
}

impl fmt::Display for FilterSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.issue_ids {
            Some(ids) => write!(
                f,
                "issues: {}",
                ids.iter()
                    .map(|id| format!("#{id}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?,
            None => write!(f, "issues: all")?,
        }
        match &self.label {
            Some(label) => write!(f, "\nlabel: {label}"),
            None => write!(f, "\nlabel: any"),
        }
    }
}

/// Combines the configured id list with the ids found in the project column.
///
/// Both non-empty gives their intersection (sorted, without duplicates); a
/// single non-empty list is returned unchanged; two empty lists mean "no id
/// filter" and give `None`.
pub fn combine(configured_ids: &[u64], column_ids: &[u64]) -> Option<Vec<u64>> {
    match (configured_ids.is_empty(), column_ids.is_empty()) {
        (false, false) => {
            let configured: BTreeSet<u64> = configured_ids.iter().copied().collect();
            let column: BTreeSet<u64> = column_ids.iter().copied().collect();
            Some(configured.intersection(&column).copied().collect())
        }
        (false, true) => Some(configured_ids.to_vec()),
        (true, false) => Some(column_ids.to_vec()),
        (true, true) => None,
    }
}

/// Builds the filter for the report from the settings and the live project board.
///
/// Owner and project failures abort. Any failure after the project is found
/// only disables column filtering.
pub async fn collect_filter<E: GraphQlExecutor>(
    executor: &E,
    settings: &ReportSettings,
) -> Result<FilterSpecification, ResolveError> {
    let column_ids = match (settings.column.as_deref(), &settings.project_number) {
        (Some(column), ProjectNumber::Index(number)) => {
            info!(column, number, "Fetching issues from project column");
            let ids = column_issue_numbers(executor, &settings.repository, *number, column).await?;
            if ids.is_empty() {
                info!(column, "No issues found in column or column not found in project");
                if settings.issue_ids.is_empty() {
                    warn!("No issues match the filter criteria. Will fetch all issues.");
                }
            } else {
                info!(column, count = ids.len(), "Found issues in column");
            }
            ids
        }
        (Some(_), ProjectNumber::Empty) => {
            warn!("project_number is empty in config. Skipping project column filtering.");
            Vec::new()
        }
        (Some(_), ProjectNumber::Invalid(raw)) => {
            warn!(
                project_number = %raw,
                "Invalid project number. Must be a positive integer. Skipping project column filtering."
            );
            Vec::new()
        }
        (None, _) | (_, ProjectNumber::Unset) => Vec::new(),
    };

    let issue_ids = combine(&settings.issue_ids, &column_ids);
    if !settings.issue_ids.is_empty() && !column_ids.is_empty() {
        let count = issue_ids.as_ref().map_or(0, Vec::len);
        info!(count, "Combined column issues with configured issue id list");
        if count == 0 {
            warn!("Configured issue ids and column issues do not overlap. No issues will be included.");
        }
    }

    Ok(FilterSpecification {
        issue_ids,
        label: settings.label.clone(),
    })
}

async fn column_issue_numbers<E: GraphQlExecutor>(
    executor: &E,
    repository: &RepositoryRef,
    project_number: i64,
    column: &str,
) -> Result<Vec<u64>, ResolveError> {
    let owner_id = owner::resolve_owner(executor, &repository.owner).await?;
    let project_id = project::resolve_project(executor, &owner_id, project_number).await?;

    // Past project resolution every failure only disables column filtering.
    let descriptor = match project::resolve_column(executor, &project_id, column).await {
        Ok(Some(descriptor)) => descriptor,
        Ok(None) => return Ok(Vec::new()),
        Err(err) => {
            warn!(error = %err, column, "Failed to filter by project column");
            return Ok(Vec::new());
        }
    };

    match project::list_items_in_column(executor, &project_id, &descriptor, &repository.name).await
    {
        Ok(ids) => Ok(ids),
        Err(err) => {
            warn!(error = %err, column, "Failed to filter by project column");
            Ok(Vec::new())
        }
    }
}
