//! Error types for the model crate

/// Errors raised when converting raw text into model values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    /// Status name outside the four workflow states
    #[error("unknown issue status: '{0}'")]
    UnknownStatus(String),

    /// Route or search parameter that is not an integer id
    #[error("invalid issue id: '{0}'")]
    InvalidId(String),
}
