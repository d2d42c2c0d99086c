use std::fmt;
use thiserror::Error;

/// Owner login and repository name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub owner: String,
    pub name: String,
}

#[derive(Debug, Error, PartialEq)]
#[error("Invalid repository format: {input}. Expected format: owner/repo or https://github.com/owner/repo")]
pub struct RepositoryParseError {
    pub input: String,
}

impl fmt::Display for RepositoryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Parses a repository reference from either a GitHub URL or the `owner/repo` shorthand.
///
/// URL form accepts `http`/`https`, an optional `www.` prefix, a trailing `.git`
/// and anything after the repository segment (`/tree/main`, ...). The repository
/// name ends at the first `/` or `.`.
///
/// # Examples
///
/// * `https://github.com/Acme/widget.git` → `("Acme", "widget")`
/// * `Acme/widget` → `("Acme", "widget")`
pub fn parse_repository(input: &str) -> Result<RepositoryRef, RepositoryParseError> {
    parse_url(input)
        .or_else(|| parse_shorthand(input))
        .ok_or_else(|| RepositoryParseError {
            input: input.to_string(),
        })
}

fn parse_url(input: &str) -> Option<RepositoryRef> {
    let rest = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))?;
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let rest = rest.strip_prefix("github.com/")?;

    let (owner, tail) = rest.split_once('/')?;
    let name_end = tail.find(['/', '.']).unwrap_or(tail.len());
    let name = &tail[..name_end];

    if owner.is_empty() || name.is_empty() {
        return None;
    }

    Some(RepositoryRef {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}

fn parse_shorthand(input: &str) -> Option<RepositoryRef> {
    let (owner, name) = input.split_once('/')?;
    if owner.is_empty() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some(RepositoryRef {
        owner: owner.to_string(),
        name: name.to_string(),
    })
}
