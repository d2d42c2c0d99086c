use crate::repository::{RepositoryRef, parse_repository};
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    PrivateGithub,
    FilterIssueIdList,
    FilterIssueLabel,
    FilterIssueColumn,
    ProjectNumber,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::PrivateGithub => "private_github",
            ConfigKey::FilterIssueIdList => "filter_issue_id_list",
            ConfigKey::FilterIssueLabel => "filter_issue_label",
            ConfigKey::FilterIssueColumn => "filter_issue_column",
            ConfigKey::ProjectNumber => "project_number",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::PrivateGithub,
            ConfigKey::FilterIssueIdList,
            ConfigKey::FilterIssueLabel,
            ConfigKey::FilterIssueColumn,
            ConfigKey::ProjectNumber,
        ]
    }
}

/// Filename for the report configuration within the config directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for the report configuration.
pub const PROJECT_CONFIG_DIR: &str = ".audit-report";
/// Column used when `filter_issue_column` is not configured.
pub const DEFAULT_COLUMN: &str = "Report";

/// Project board index as found in the configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectNumber {
    Unset,
    Empty,
    Invalid(String),
    Index(i64),
}

/// Typed view of the configuration consumed by issue collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub repository: RepositoryRef,
    pub issue_ids: Vec<u64>,
    pub label: Option<String>,
    pub column: Option<String>,
    pub project_number: ProjectNumber,
}

/// Parses a JSON configuration file content into a map of configuration values.
///
/// - Returns `Ok(HashMap<ConfigKey, Value>)` containing all recognised keys; unknown keys are skipped.
/// - Returns an empty HashMap if the input `content` is empty or contains only whitespace.
/// - Returns an `Err` if the JSON parsing fails or the top-level value is not an object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content).context("Failed to parse config JSON")?;

    if let Value::Object(map) = &value {
        let config_map = ConfigKey::all()
            .iter()
            .filter_map(|key| map.get(key.as_str()).map(|val| (*key, val.clone())))
            .collect();
        return Ok(config_map);
    }

    Err(anyhow::anyhow!("Config must be a JSON object"))
}

/// Builds [`ReportSettings`] from a parsed configuration map.
///
/// Only a missing or malformed `private_github` is an error. Every filter
/// setting degrades to "not set" when it cannot be interpreted.
pub fn report_settings(config: &HashMap<ConfigKey, Value>) -> Result<ReportSettings> {
    let repo = config
        .get(&ConfigKey::PrivateGithub)
        .and_then(Value::as_str)
        .context("`private_github` must be set to owner/repo or a GitHub URL")?;
    let repository = parse_repository(repo)?;

    Ok(ReportSettings {
        repository,
        issue_ids: issue_ids(config.get(&ConfigKey::FilterIssueIdList)),
        label: non_empty_string(config.get(&ConfigKey::FilterIssueLabel)),
        column: match config.get(&ConfigKey::FilterIssueColumn) {
            None => Some(DEFAULT_COLUMN.to_string()),
            Some(value) => non_empty_string(Some(value)),
        },
        project_number: project_number(config.get(&ConfigKey::ProjectNumber)),
    })
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn issue_ids(value: Option<&Value>) -> Vec<u64> {
    let Some(value) = value else {
        return Vec::new();
    };
    let Some(entries) = value.as_array() else {
        if !value.is_null() {
            warn!(value = %value, "filter_issue_id_list must be a list. Ignoring it.");
        }
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| {
            let id = match entry {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().parse::<u64>().ok(),
                _ => None,
            };
            if id.is_none() {
                warn!(entry = %entry, "Ignoring invalid issue id in filter_issue_id_list");
            }
            id
        })
        .collect()
}

/// Interprets `project_number` the way a user would type it: a positive integer
/// or a numeric string.
pub fn project_number(value: Option<&Value>) -> ProjectNumber {
    let raw = match value {
        None | Some(Value::Null) => return ProjectNumber::Unset,
        Some(Value::String(s)) if s.trim().is_empty() => return ProjectNumber::Empty,
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    match raw.trim().parse::<i64>() {
        // Project numbers start at 1.
        Ok(number) if number > 0 => ProjectNumber::Index(number),
        _ => ProjectNumber::Invalid(raw),
    }
}
