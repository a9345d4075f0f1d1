//! Network seam
//!
//! The GraphQL and auth clients only need "POST this JSON, give me the body
//! text". Keeping that behind a trait lets tests script responses and
//! completion order without a server.

use crate::error::TransportError;
use async_trait::async_trait;
use reqwest::header::COOKIE;
use serde_json::Value;
use std::time::Duration;

/// Default request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One JSON POST
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub url: String,
    pub body: Value,
    /// Explicit `Cookie` header (server-side renders only)
    pub cookie: Option<String>,
}

impl TransportRequest {
    #[must_use]
    pub fn new(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            body,
            cookie: None,
        }
    }

    #[must_use]
    pub fn with_cookie(mut self, cookie: Option<String>) -> Self {
        self.cookie = cookie;
        self
    }
}

/// POST-JSON-return-text
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Send `request`, returning the raw response body
    async fn post_json(&self, request: TransportRequest) -> Result<String, TransportError>;
}

/// Production transport over `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build with the default timeout
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Setup(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, request: TransportRequest) -> Result<String, TransportError> {
        let mut builder = self.client.post(&request.url).json(&request.body);
        if let Some(cookie) = &request.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        // GraphQL servers put error details in 4xx bodies; only an empty
        // failure body is a transport-level error.
        if !status.is_success() && text.trim().is_empty() {
            return Err(TransportError::Status {
                url: request.url,
                status: status.as_u16(),
            });
        }
        tracing::trace!(url = %request.url, status = status.as_u16(), bytes = text.len(), "response received");
        Ok(text)
    }
}
