//! Issue Tracker Model
//!
//! Domain types shared by the fetch client, the page controllers and the
//! server renderer.
//!
//! # Core Concepts
//!
//! - [`Issue`]: A tracked issue as returned by the backend
//! - [`IssueStatus`]: The four workflow states
//! - [`IssueChanges`]: Partial update payload for `issueUpdate`
//! - [`IssueFilter`]: Filter derived from (and rendered back to) a URL search string
//! - [`OwnerCounts`]: One row of the per-owner status report
//! - [`User`]: Sign-in state of the current session
//!
//! Date-valued fields arrive from the backend as ISO strings and are revived
//! into `DateTime<Utc>` during deserialization (see [`revive`]).

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod filter;
mod issue;
pub mod revive;
mod user;

pub use error::ModelError;
pub use filter::{parse_leading_int, IssueFilter, ListQuery};
pub use issue::{Issue, IssueChanges, IssueDetail, IssueId, IssueList, IssueStatus, NewIssue, OwnerCounts};
pub use user::User;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
