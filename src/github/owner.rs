use crate::github::NodeId;
use crate::github::errors::ResolveError;
use crate::github::graphql::{GraphQlError, GraphQlExecutor, GraphQlRequest, decode_data};
use crate::github::queries;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

/// Result of probing which kind of account owns a login.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnerKind {
    Organization(NodeId),
    User(NodeId),
    NotFound,
}

#[derive(Deserialize, Debug)]
struct OrganizationData {
    organization: Option<IdNode>,
}

#[derive(Deserialize, Debug)]
struct UserData {
    user: Option<IdNode>,
}

#[derive(Deserialize, Debug)]
struct IdNode {
    id: Option<NodeId>,
}

/// Probes `login` as an organization first and as a user second.
///
/// Any organization lookup failure, including a GraphQL "could not resolve"
/// error, falls through to the user lookup. Failures of the user lookup itself
/// are returned as errors; a user lookup that simply finds nothing yields
/// [`OwnerKind::NotFound`].
pub async fn probe_owner<E: GraphQlExecutor>(
    executor: &E,
    login: &str,
) -> Result<OwnerKind, GraphQlError> {
    info!(login, "Looking up organization");
    match lookup_organization(executor, login).await {
        Ok(Some(id)) => return Ok(OwnerKind::Organization(id)),
        Ok(None) => warn!(login, "Organization not found, trying as user instead"),
        Err(err) => warn!(
            login,
            error = %err,
            "Could not find organization, trying as user instead"
        ),
    }

    info!(login, "Looking up user");
    Ok(lookup_user(executor, login)
        .await?
        .map_or(OwnerKind::NotFound, OwnerKind::User))
}

/// Resolves a repository owner's node id, failing when neither kind exists.
pub async fn resolve_owner<E: GraphQlExecutor>(
    executor: &E,
    login: &str,
) -> Result<NodeId, ResolveError> {
    match probe_owner(executor, login).await? {
        OwnerKind::Organization(id) | OwnerKind::User(id) => Ok(id),
        OwnerKind::NotFound => Err(ResolveError::OwnerNotFound {
            login: login.to_string(),
        }),
    }
}

async fn lookup_organization<E: GraphQlExecutor>(
    executor: &E,
    login: &str,
) -> Result<Option<NodeId>, GraphQlError> {
    let request = GraphQlRequest::new(queries::ORGANIZATION, json!({ "login": login }));
    let body = executor.execute(&request).await?;
    let data: Option<OrganizationData> = decode_data(body)?;
    Ok(data.and_then(|d| d.organization).and_then(|o| o.id))
}

async fn lookup_user<E: GraphQlExecutor>(
    executor: &E,
    login: &str,
) -> Result<Option<NodeId>, GraphQlError> {
    let request = GraphQlRequest::new(queries::USER, json!({ "login": login }));
    let body = executor.execute(&request).await?;
    let data: Option<UserData> = decode_data(body)?;
    Ok(data.and_then(|d| d.user).and_then(|u| u.id))
}
