//! GraphQL fetch client
//!
//! One POST per operation. Responses may carry both `data` and `errors`;
//! the first error is reported and whatever `data` came back is still
//! returned. A round-trip that fails outright yields `None` ("no data"),
//! which callers keep distinct from an empty result.

use crate::context::ExecutionContext;
use crate::error::FetchError;
use crate::report::{report, ErrorReporter};
use crate::transport::{Transport, TransportRequest};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Error code the backend uses for validation failures
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";

/// Decoded response envelope
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

impl GraphQlResponse {
    #[must_use]
    pub fn first_error(&self) -> Option<&GraphQlError> {
        self.errors.as_ref().and_then(|errors| errors.first())
    }
}

/// One entry of the `errors` array
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: ErrorExtensions,
}

/// Machine-readable part of an error
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default)]
    pub code: Option<String>,
    /// Per-field details for `BAD_USER_INPUT`
    #[serde(default)]
    pub errors: Vec<String>,
}

impl GraphQlError {
    #[inline]
    #[must_use]
    pub fn code(&self) -> &str {
        self.extensions.code.as_deref().unwrap_or("UNKNOWN")
    }

    /// Message shown to the user
    #[must_use]
    pub fn user_message(&self) -> String {
        if self.code() == BAD_USER_INPUT {
            format!("{}:\n {}", self.message, self.extensions.errors.join(" \n"))
        } else {
            format!("Error code is: {}.\n Message: {}", self.code(), self.message)
        }
    }
}

/// Client bound to one endpoint and execution context
#[derive(Clone)]
pub struct GraphQlClient {
    endpoint: String,
    context: ExecutionContext,
    transport: Arc<dyn Transport>,
    reporter: Option<Arc<dyn ErrorReporter>>,
    cookie: Option<String>,
}

impl std::fmt::Debug for GraphQlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQlClient")
            .field("endpoint", &self.endpoint)
            .field("context", &self.context)
            .field("has_reporter", &self.reporter.is_some())
            .field("has_cookie", &self.cookie.is_some())
            .finish_non_exhaustive()
    }
}

impl GraphQlClient {
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        context: ExecutionContext,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            context,
            transport,
            reporter: None,
            cookie: None,
        }
    }

    /// Route errors to `reporter` instead of the log
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    /// Visitor's cookie header, forwarded only by server-side renders
    #[must_use]
    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        if cookie.is_some() && !self.context.forwards_cookie() {
            tracing::debug!("ignoring explicit cookie in client context");
            return self;
        }
        self.cookie = cookie;
        self
    }

    #[inline]
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    #[inline]
    #[must_use]
    pub fn context(&self) -> ExecutionContext {
        self.context
    }

    /// One round-trip with structured errors
    pub async fn execute(&self, query: &str, variables: Value) -> Result<GraphQlResponse, FetchError> {
        let request = TransportRequest::new(
            self.endpoint.clone(),
            json!({ "query": query, "variables": variables }),
        )
        .with_cookie(self.cookie.clone());

        let text = self.transport.post_json(request).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Fetch raw `data`, reporting any error
    pub async fn fetch_data(&self, query: &str, variables: Value) -> Option<Value> {
        match self.execute(query, variables).await {
            Ok(response) => {
                if let Some(error) = response.first_error() {
                    tracing::debug!(code = error.code(), "backend returned errors");
                    self.report(&error.user_message());
                }
                response.data.filter(|data| !data.is_null())
            }
            Err(err) => {
                tracing::debug!(context = %self.context, error = %err, "fetch failed");
                self.report(&format!("Error in GraphQL fetch: {err}"));
                None
            }
        }
    }

    /// Fetch and decode `data` into `T`
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Option<T> {
        let data = self.fetch_data(query, variables).await?;
        match serde_json::from_value(data) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                let err = FetchError::Decode {
                    operation: operation.to_string(),
                    message: err.to_string(),
                };
                self.report(&err.to_string());
                None
            }
        }
    }

    /// Report through the configured reporter or the log
    pub fn report(&self, message: &str) {
        report(self.reporter.as_deref(), message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error(code: &str, details: &[&str]) -> GraphQlError {
        GraphQlError {
            message: "Invalid input(s)".to_string(),
            extensions: ErrorExtensions {
                code: Some(code.to_string()),
                errors: details.iter().map(ToString::to_string).collect(),
            },
        }
    }

    #[test]
    fn bad_user_input_lists_details() {
        let err = error(BAD_USER_INPUT, &["title too short", "owner required"]);
        assert_eq!(
            err.user_message(),
            "Invalid input(s):\n title too short \nowner required"
        );
    }

    #[test]
    fn other_codes_show_code() {
        let err = error("UNAUTHENTICATED", &[]);
        assert_eq!(
            err.user_message(),
            "Error code is: UNAUTHENTICATED.\n Message: Invalid input(s)"
        );
    }

    #[test]
    fn envelope_tolerates_null_errors() {
        let response: GraphQlResponse =
            serde_json::from_str(r#"{"data": {"x": 1}, "errors": null}"#).unwrap();
        assert!(response.first_error().is_none());
    }
}
