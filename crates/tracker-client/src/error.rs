//! Error types for the client
//!
//! Errors stay inside the client: the public fetch path reports them and
//! yields "no data". They are exposed for callers that want the structured
//! form via [`crate::GraphQlClient::execute`].

/// Failures below the GraphQL layer
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Request could not be sent or the connection failed
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },

    /// Server answered with a non-success status and no usable body
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// HTTP client could not be built
    #[error("http client setup failed: {0}")]
    Setup(String),
}

impl TransportError {
    pub fn network(url: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Network {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let url = err.url().map(ToString::to_string).unwrap_or_default();
        match err.status() {
            Some(status) => Self::Status {
                url,
                status: status.as_u16(),
            },
            None => Self::network(url, err),
        }
    }
}

/// Failures of one GraphQL round-trip
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Body was not a GraphQL response
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// `data` did not match the expected shape
    #[error("unexpected response shape for {operation}: {message}")]
    Decode { operation: String, message: String },
}

impl FetchError {
    /// Worth retrying later (network trouble, not a bad payload)
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Transport(TransportError::Network { .. })
                | Self::Transport(TransportError::Status { status: 500..=599, .. })
        )
    }
}
