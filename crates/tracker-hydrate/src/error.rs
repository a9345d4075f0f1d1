//! Error types for the hydration handoff

use crate::slot::HydrationSlot;

/// Errors while storing or reading embedded hydration data
#[derive(Debug, thiserror::Error)]
pub enum HydrationError {
    /// A slot was written twice in one page-load cycle
    #[error("hydration slot {slot} already stored in scope {scope}")]
    AlreadyStored { slot: HydrationSlot, scope: uuid::Uuid },

    /// The embedded global is present but is not valid JSON
    #[error("malformed {slot} in page: {message}")]
    Malformed { slot: HydrationSlot, message: String },

    /// A value could not be serialized for embedding
    #[error("cannot embed {slot}: {source}")]
    Encode {
        slot: HydrationSlot,
        #[source]
        source: serde_json::Error,
    },
}

impl HydrationError {
    pub fn malformed(slot: HydrationSlot, message: impl std::fmt::Display) -> Self {
        Self::Malformed {
            slot,
            message: message.to_string(),
        }
    }
}

/// Result alias for hydration operations
pub type Result<T> = std::result::Result<T, HydrationError>;
