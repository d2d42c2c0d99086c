use crate::github::graphql::{GraphQlError, GraphQlExecutor, GraphQlRequest, check_response};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;

/// Executor that replays canned response bodies in order and records every request.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: RefCell<VecDeque<Result<Value, GraphQlError>>>,
    requests: RefCell<Vec<GraphQlRequest>>,
}

impl ScriptedExecutor {
    pub fn new(bodies: Vec<Value>) -> Self {
        ScriptedExecutor {
            responses: RefCell::new(bodies.into_iter().map(Ok).collect()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn push_body(&self, body: Value) {
        self.responses.borrow_mut().push_back(Ok(body));
    }

    pub fn push_transport_failure(&self) {
        self.responses
            .borrow_mut()
            .push_back(Err(GraphQlError::Status(reqwest::StatusCode::BAD_GATEWAY)));
    }

    pub fn requests(&self) -> Vec<GraphQlRequest> {
        self.requests.borrow().clone()
    }

    pub fn queries(&self) -> Vec<&'static str> {
        self.requests.borrow().iter().map(|r| r.query).collect()
    }
}

impl GraphQlExecutor for ScriptedExecutor {
    async fn execute(&self, request: &GraphQlRequest) -> Result<Value, GraphQlError> {
        self.requests.borrow_mut().push(request.clone());
        let next = self.responses.borrow_mut().pop_front();
        match next {
            Some(Ok(body)) => check_response(body),
            Some(Err(err)) => Err(err),
            None => Err(GraphQlError::Query("no scripted response left".to_string())),
        }
    }
}
