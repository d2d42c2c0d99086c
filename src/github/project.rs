//! Project board lookups: project id, status column, and the issues placed in it.
//!
//! Responses are modelled with `Option` at every level because the API omits
//! whole objects for fragments that do not apply (a text field in the fields
//! list, a pull request as item content, ...). Only the first page of fields,
//! items and field values is read; see [`queries`] for the page sizes.

use crate::github::NodeId;
use crate::github::errors::ResolveError;
use crate::github::graphql::{GraphQlExecutor, GraphQlRequest, decode_data};
use crate::github::queries;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

/// A single-select field option that acts as a board column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    pub field_id: NodeId,
    pub option_id: String,
    pub name: String,
}

#[derive(Deserialize, Debug)]
struct NodeData<T> {
    node: Option<T>,
}

#[derive(Deserialize, Debug)]
struct Connection<T> {
    nodes: Option<Vec<Option<T>>>,
}

#[derive(Deserialize, Debug)]
struct ProjectOwnerNode {
    #[serde(rename = "projectV2")]
    project_v2: Option<ProjectNode>,
}

#[derive(Deserialize, Debug)]
struct ProjectNode {
    id: Option<NodeId>,
}

#[derive(Deserialize, Debug)]
struct ProjectFieldsNode {
    fields: Option<Connection<ProjectField>>,
}

#[derive(Deserialize, Debug)]
pub struct ProjectField {
    pub id: Option<NodeId>,
    pub name: Option<String>,
    pub options: Option<Vec<FieldOption>>,
}

#[derive(Deserialize, Debug)]
pub struct FieldOption {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ProjectItemsNode {
    items: Option<Connection<ProjectItem>>,
}

#[derive(Deserialize, Debug)]
pub struct ProjectItem {
    #[serde(rename = "fieldValues")]
    field_values: Option<Connection<FieldValue>>,
    content: Option<ItemContent>,
}

#[derive(Deserialize, Debug)]
struct FieldValue {
    #[serde(rename = "optionId")]
    option_id: Option<String>,
    field: Option<FieldRef>,
}

#[derive(Deserialize, Debug)]
struct FieldRef {
    id: Option<NodeId>,
}

#[derive(Deserialize, Debug)]
struct ItemContent {
    number: Option<u64>,
    repository: Option<RepositoryName>,
}

#[derive(Deserialize, Debug)]
struct RepositoryName {
    name: Option<String>,
}

/// Resolves the node id of project `number` owned by `owner_id`.
pub async fn resolve_project<E: GraphQlExecutor>(
    executor: &E,
    owner_id: &NodeId,
    number: i64,
) -> Result<NodeId, ResolveError> {
    info!(owner_id = %owner_id, number, "Looking up project");
    let request = GraphQlRequest::new(
        queries::PROJECT,
        json!({ "ownerId": owner_id.as_str(), "number": number }),
    );
    let body = executor.execute(&request).await?;
    let data: Option<NodeData<ProjectOwnerNode>> = decode_data(body)?;

    let Some(owner) = data.and_then(|d| d.node) else {
        return Err(ResolveError::NodeNotFound(owner_id.clone()));
    };
    owner
        .project_v2
        .and_then(|p| p.id)
        .ok_or(ResolveError::ProjectNotFound { number })
}

/// Looks up the field/option pair named `column_name` among the project's
/// single-select fields. `Ok(None)` means no such column exists.
pub async fn resolve_column<E: GraphQlExecutor>(
    executor: &E,
    project_id: &NodeId,
    column_name: &str,
) -> Result<Option<ColumnDescriptor>, ResolveError> {
    info!(column = column_name, "Looking for column in project");
    let request = GraphQlRequest::new(
        queries::PROJECT_FIELDS,
        json!({ "projectId": project_id.as_str() }),
    );
    let body = executor.execute(&request).await?;
    let data: Option<NodeData<ProjectFieldsNode>> = decode_data(body)?;

    let fields = data
        .and_then(|d| d.node)
        .and_then(|n| n.fields)
        .and_then(|c| c.nodes)
        .filter(|nodes| !nodes.is_empty())
        .ok_or_else(|| ResolveError::FieldsMissing(project_id.clone()))?;

    let column = find_column(&fields, column_name);
    if column.is_none() {
        info!(column = column_name, "Column not found in any project field");
    }
    Ok(column)
}

/// Scans fields in order and returns the first option named `column_name`.
///
/// Fields without a name are skipped. Scanning stops at the first field that
/// contains a match.
pub fn find_column(fields: &[Option<ProjectField>], column_name: &str) -> Option<ColumnDescriptor> {
    fields
        .iter()
        .take(queries::FIELDS_PAGE_SIZE as usize)
        .flatten()
        .filter(|field| field.name.is_some())
        .find_map(|field| {
            let options = field.options.as_ref()?;
            debug!(
                field = field.name.as_deref().unwrap_or("Unnamed"),
                options = %options
                    .iter()
                    .map(|o| o.name.as_deref().unwrap_or("Unnamed"))
                    .collect::<Vec<_>>()
                    .join(", "),
                "Available project field"
            );
            let option = options
                .iter()
                .find(|o| o.name.as_deref() == Some(column_name))?;
            Some((field, option))
        })
        .and_then(|(field, option)| {
            Some(ColumnDescriptor {
                field_id: field.id.clone()?,
                option_id: option.id.clone()?,
                name: column_name.to_string(),
            })
        })
}

/// Lists issue numbers of `repository_name` whose items sit in `column`, in
/// the order the API returned them.
pub async fn list_items_in_column<E: GraphQlExecutor>(
    executor: &E,
    project_id: &NodeId,
    column: &ColumnDescriptor,
    repository_name: &str,
) -> Result<Vec<u64>, ResolveError> {
    info!(column = %column.name, "Fetching issues in the column");
    let request = GraphQlRequest::new(
        queries::PROJECT_ITEMS,
        json!({ "projectId": project_id.as_str() }),
    );
    let body = executor.execute(&request).await?;
    let data: Option<NodeData<ProjectItemsNode>> = decode_data(body)?;

    let items = data
        .and_then(|d| d.node)
        .and_then(|n| n.items)
        .and_then(|c| c.nodes)
        .filter(|nodes| !nodes.is_empty())
        .ok_or_else(|| ResolveError::ItemsMissing(project_id.clone()))?;

    Ok(issue_numbers_in_column(&items, column, repository_name))
}

pub fn issue_numbers_in_column(
    items: &[Option<ProjectItem>],
    column: &ColumnDescriptor,
    repository_name: &str,
) -> Vec<u64> {
    items
        .iter()
        .take(queries::ITEMS_PAGE_SIZE as usize)
        .flatten()
        .filter(|item| is_in_column(item, column))
        .filter_map(|item| {
            let content = item.content.as_ref()?;
            let number = content.number?;
            let repository = content.repository.as_ref()?.name.as_deref()?;
            (repository == repository_name).then_some(number)
        })
        .collect()
}

fn is_in_column(item: &ProjectItem, column: &ColumnDescriptor) -> bool {
    item.field_values
        .as_ref()
        .and_then(|c| c.nodes.as_ref())
        .is_some_and(|values| {
            values
                .iter()
                .take(queries::FIELD_VALUES_PAGE_SIZE as usize)
                .flatten()
                .any(|value| {
                    value.field.as_ref().and_then(|f| f.id.as_ref()) == Some(&column.field_id)
                        && value.option_id.as_deref() == Some(column.option_id.as_str())
                })
        })
}
