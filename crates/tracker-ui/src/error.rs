//! Error types for the UI server

use tracker_hydrate::HydrationError;

/// Invalid or incomplete configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An endpoint is not an absolute http(s) URL
    #[error("invalid {name} endpoint '{value}': {message}")]
    InvalidEndpoint {
        name: &'static str,
        value: String,
        message: String,
    },

    /// A numeric setting did not parse
    #[error("invalid {name} '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

impl ConfigError {
    pub fn invalid_endpoint(
        name: &'static str,
        value: impl Into<String>,
        message: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidEndpoint {
            name,
            value: value.into(),
            message: message.to_string(),
        }
    }
}

/// Errors from a server-side render
#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Hydration(#[from] HydrationError),

    #[error("cannot listen on {addr}: {message}")]
    Bind {
        addr: std::net::SocketAddr,
        message: String,
    },

    #[error("transport setup failed: {0}")]
    Transport(#[from] tracker_client::TransportError),
}

/// Result alias for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
