//! Execution context injected into the fetch client

use serde::{Deserialize, Serialize};

/// Where the client is running
///
/// The server render reaches the backend through its own (often private)
/// endpoint and must forward the visitor's cookie explicitly; the browser
/// runtime uses the public endpoint and lets the browser attach cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionContext {
    Server,
    Client,
}

impl ExecutionContext {
    #[inline]
    #[must_use]
    pub fn is_server(self) -> bool {
        matches!(self, Self::Server)
    }

    /// Whether an explicit `Cookie` header should be sent
    #[inline]
    #[must_use]
    pub fn forwards_cookie(self) -> bool {
        self.is_server()
    }
}

impl std::fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Server => "server",
            Self::Client => "client",
        })
    }
}
