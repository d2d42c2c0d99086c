use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use thiserror::Error;

/// GitHub GraphQL endpoint used when `GITHUB_GRAPHQL_URL` is not set.
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";

/// Request body sent to the GraphQL endpoint.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GraphQlRequest {
    pub query: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,
}

impl GraphQlRequest {
    pub fn new(query: &'static str, variables: Value) -> Self {
        GraphQlRequest {
            query,
            variables: Some(variables),
        }
    }
}

/// Response envelope. Both keys are optional on the wire.
#[derive(Deserialize, Debug)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GraphQlErrorEntry {
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum GraphQlError {
    #[error("GraphQL request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GraphQL request failed: HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("GraphQL Error: {0}")]
    Query(String),
    #[error("Failed to decode GraphQL response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Executes one GraphQL request and returns the full response body.
///
/// Implementations must fail on transport errors and whenever the body carries
/// a non-empty `errors` list, even if `data` is present as well.
pub trait GraphQlExecutor {
    fn execute(&self, request: &GraphQlRequest) -> impl Future<Output = Result<Value, GraphQlError>>;
}

/// Turns a raw response body into `Ok(body)` or the joined GraphQL error messages.
pub fn check_response(body: Value) -> Result<Value, GraphQlError> {
    let errors = match body.get("errors") {
        Some(errors) if !errors.is_null() => Vec::<Option<GraphQlErrorEntry>>::deserialize(errors)?,
        _ => Vec::new(),
    };
    if errors.is_empty() {
        return Ok(body);
    }
    let message = errors
        .iter()
        .map(|entry| {
            entry
                .as_ref()
                .and_then(|e| e.message.as_deref())
                .unwrap_or("Unknown error")
        })
        .collect::<Vec<_>>()
        .join("; ");
    Err(GraphQlError::Query(message))
}

/// Extracts the typed `data` payload from a checked response body.
///
/// `Ok(None)` means the service answered without data, which callers treat as
/// "not found" for the entity they asked about.
pub fn decode_data<T>(body: Value) -> Result<Option<T>, GraphQlError>
where
    T: serde::de::DeserializeOwned,
{
    let response: GraphQlResponse<T> = serde_json::from_value(body)?;
    Ok(response.data)
}

/// Bearer-token executor talking to GitHub over HTTPS.
pub struct HttpGraphQlExecutor {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl HttpGraphQlExecutor {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        HttpGraphQlExecutor {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

impl GraphQlExecutor for HttpGraphQlExecutor {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, GraphQlError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .header("Accept", "application/json")
            .header("User-Agent", "audit-report-cli")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GraphQlError::Status(response.status()));
        }

        let body = response.json::<Value>().await?;
        check_response(body)
    }
}
