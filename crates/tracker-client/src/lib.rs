//! Issue Tracker Client
//!
//! Everything that talks to the backend:
//!
//! - [`GraphQlClient`]: posts `{query, variables}` and returns `data`,
//!   routing failures through an [`ErrorReporter`]
//! - [`Transport`]: the network seam ([`HttpTransport`] in production)
//! - [`ExecutionContext`]: whether the client runs inside the server render
//!   or in the hydrated browser runtime
//! - [`queries`]: the typed operations the pages use
//! - [`LoadSequencer`]: discards responses that arrive for a superseded
//!   request or an unmounted consumer
//! - [`AuthClient`]: token exchange with the auth endpoint
//!
//! # Example
//!
//! ```rust,ignore
//! use tracker_client::{queries, ExecutionContext, GraphQlClient, HttpTransport};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = std::sync::Arc::new(HttpTransport::new()?);
//! let client = GraphQlClient::new("http://localhost:3000/graphql", ExecutionContext::Client, transport);
//!
//! if let Some(data) = queries::issue_get(&client, tracker_model::IssueId(7)).await {
//!     println!("{:?}", data.issue_get);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod auth;
pub mod context;
pub mod error;
pub mod graphql;
pub mod queries;
pub mod report;
pub mod sequence;
pub mod transport;

pub use auth::AuthClient;
pub use context::ExecutionContext;
pub use error::{FetchError, TransportError};
pub use graphql::{GraphQlClient, GraphQlError, GraphQlResponse};
pub use report::{ErrorReporter, LogReporter};
pub use sequence::{LoadSequencer, LoadTicket};
pub use transport::{HttpTransport, Transport, TransportRequest};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for page controllers
    pub use crate::{
        queries, ErrorReporter, ExecutionContext, GraphQlClient, LoadSequencer, LoadTicket,
        Transport,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
