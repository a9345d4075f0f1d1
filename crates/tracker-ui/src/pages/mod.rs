//! Page controllers
//!
//! Each page is a plain state struct. Mounting drains the page's slot from
//! the hydration scope and fetches only when nothing was handed off. User
//! actions are async methods that round-trip through the fetch client and
//! fold the result back into the state.

mod filter_form;
mod issue_add;
mod issue_edit;
mod issue_list;
mod issue_report;
mod search;
mod shell;

pub use filter_form::FilterForm;
pub use issue_add::IssueAddForm;
pub use issue_edit::{EditField, EditState, IssueEditPage};
pub use issue_list::{IssueListPage, ListKey, PageSection, SECTION_SIZE};
pub use issue_report::IssueReportPage;
pub use search::SearchBox;
pub use shell::UserSession;

use crate::toast::ToastQueue;
use std::sync::Arc;
use tracker_client::GraphQlClient;
use tracker_hydrate::HydrationScope;

/// Client-side navigation requested by a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigate(pub String);

impl Navigate {
    #[must_use]
    pub fn to(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.0
    }
}

/// What every controller needs from its surroundings
#[derive(Debug, Clone)]
pub struct PageContext {
    client: GraphQlClient,
    scope: Arc<HydrationScope>,
    toasts: Arc<ToastQueue>,
}

impl PageContext {
    /// Errors from `client` are routed to `toasts`
    #[must_use]
    pub fn new(client: GraphQlClient, scope: Arc<HydrationScope>, toasts: Arc<ToastQueue>) -> Self {
        let client = client.with_reporter(toasts.clone());
        Self {
            client,
            scope,
            toasts,
        }
    }

    #[inline]
    #[must_use]
    pub fn client(&self) -> &GraphQlClient {
        &self.client
    }

    #[inline]
    #[must_use]
    pub fn scope(&self) -> &HydrationScope {
        &self.scope
    }

    #[inline]
    #[must_use]
    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }
}
