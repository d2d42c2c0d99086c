use crate::github::NodeId;
use crate::github::graphql::GraphQlError;
use thiserror::Error;

/// Failures while resolving owners, projects, columns and project items.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    GraphQl(#[from] GraphQlError),
    #[error("Owner '{login}' was found neither as an organization nor as a user. Check the repository owner name.")]
    OwnerNotFound { login: String },
    #[error("Node with ID '{0}' not found")]
    NodeNotFound(NodeId),
    #[error("Project #{number} not found for the given owner. Check your project_number in the config.")]
    ProjectNotFound { number: i64 },
    #[error("Failed to get project fields for project '{0}'")]
    FieldsMissing(NodeId),
    #[error("Failed to get project items for project '{0}'")]
    ItemsMissing(NodeId),
}
