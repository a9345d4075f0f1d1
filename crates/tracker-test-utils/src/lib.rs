//! Testing utilities for the issue tracker workspace
//!
//! Scripted transport, recording reporter and issue fixtures.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tracker_client::{
    ErrorReporter, ExecutionContext, GraphQlClient, Transport, TransportError, TransportRequest,
};
use tracker_model::{Issue, IssueId};

pub const TEST_ENDPOINT: &str = "http://backend.test/graphql";

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Scripted {
    reply: Reply,
    delay: Duration,
}

/// Transport that answers from a queue, in call order
///
/// Each reply can carry a delay, so two concurrent calls can be made to
/// complete in the opposite order to how they were issued.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, reply: Reply, delay: Duration) {
        self.replies.lock().push_back(Scripted { reply, delay });
    }

    /// Reply with `{"data": data}`
    pub fn push_data(&self, data: Value) {
        self.push_data_after(data, Duration::ZERO);
    }

    pub fn push_data_after(&self, data: Value, delay: Duration) {
        self.push(Reply::Body(json!({ "data": data }).to_string()), delay);
    }

    /// Reply with a GraphQL error (and optional partial data)
    pub fn push_error(&self, code: &str, message: &str, details: &[&str], data: Value) {
        let body = json!({
            "data": data,
            "errors": [{
                "message": message,
                "extensions": { "code": code, "errors": details },
            }],
        });
        self.push(Reply::Body(body.to_string()), Duration::ZERO);
    }

    /// Reply with an arbitrary body
    pub fn push_raw(&self, body: &str) {
        self.push(Reply::Body(body.to_string()), Duration::ZERO);
    }

    /// Fail at the network level
    pub fn push_failure(&self, message: &str) {
        self.push(Reply::Fail(message.to_string()), Duration::ZERO);
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn pending_replies(&self) -> usize {
        self.replies.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post_json(&self, request: TransportRequest) -> Result<String, TransportError> {
        let url = request.url.clone();
        self.requests.lock().push(request);
        let next = self.replies.lock().pop_front();
        let Some(scripted) = next else {
            return Err(TransportError::network(url, "no scripted reply"));
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        match scripted.reply {
            Reply::Body(body) => Ok(body),
            Reply::Fail(message) => Err(TransportError::network(url, message)),
        }
    }
}

/// Reporter that keeps every message
#[derive(Debug, Default)]
pub struct RecordingReporter {
    messages: Mutex<Vec<String>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report_error(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Client over a scripted transport
pub fn scripted_client(context: ExecutionContext) -> (GraphQlClient, Arc<ScriptedTransport>) {
    let transport = ScriptedTransport::new();
    let client = GraphQlClient::new(TEST_ENDPOINT, context, transport.clone());
    (client, transport)
}

/// Wire form of a fully populated issue
pub fn issue_json(id: i64) -> Value {
    json!({
        "id": id,
        "status": "Assigned",
        "owner": format!("owner-{id}"),
        "created": "2024-01-01T00:00:00.000Z",
        "effort": id * 2,
        "due": "2024-02-01T00:00:00.000Z",
        "title": format!("Issue number {id}"),
        "description": format!("Steps to reproduce issue {id}"),
    })
}

pub fn sample_issue(id: i64) -> Issue {
    serde_json::from_value(issue_json(id)).expect("fixture decodes")
}

/// `data` for the edit page query
pub fn issue_data_json(id: i64) -> Value {
    json!({ "issueGet": issue_json(id) })
}

/// `data` for the list page query
pub fn list_data_json(ids: &[i64], pages: i64, selected: Option<i64>) -> Value {
    let issues: Vec<Value> = ids.iter().map(|id| issue_json(*id)).collect();
    let mut data = json!({ "issueList": { "issues": issues, "pages": pages } });
    if let Some(id) = selected {
        data["issueGet"] = json!({ "id": id, "description": format!("Steps to reproduce issue {id}") });
    }
    data
}

pub fn user_data_json(given_name: Option<&str>) -> Value {
    json!({ "user": { "signedIn": given_name.is_some(), "givenName": given_name } })
}

pub fn issue_id(id: i64) -> IssueId {
    IssueId(id)
}
