//! Issue list page
//!
//! One query loads the filtered page of issues and, when an issue is
//! selected in the path, its description. Changing the search reloads
//! everything; changing only the selection reloads the description.
//!
//! Both loads go through a [`LoadSequencer`], so a slow response for an
//! old search or selection never replaces a newer one.

use super::{Navigate, PageContext};
use crate::routes::HOME;
use tracker_client::queries::{self, DetailData, ListData};
use tracker_client::{GraphQlClient, LoadSequencer, LoadTicket};
use tracker_hydrate::HydrationSlot;
use tracker_model::{Issue, IssueChanges, IssueDetail, IssueId, IssueStatus, ListQuery};

/// Page links shown per pagination section
pub const SECTION_SIZE: i64 = 5;

/// Identity of a list load: search string and selection
pub type ListKey = (String, Option<IssueId>);

/// Pagination links around the active page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSection {
    pub active: i64,
    pub pages: Vec<i64>,
    /// First page of the previous section
    pub previous: Option<i64>,
    /// First page of the next section
    pub next: Option<i64>,
}

impl PageSection {
    /// Section containing `active` (clamped to 1) out of `total` pages
    #[must_use]
    pub fn around(active: Option<i64>, total: i64) -> Self {
        let active = active.filter(|page| *page > 0).unwrap_or(1);
        let start = (active - 1) / SECTION_SIZE * SECTION_SIZE + 1;
        let end = start + SECTION_SIZE - 1;
        Self {
            active,
            pages: (start..=end.min(total)).collect(),
            previous: (start > 1).then(|| start - SECTION_SIZE),
            next: (end < total).then(|| start + SECTION_SIZE),
        }
    }
}

#[derive(Debug, Clone)]
struct Deleted {
    index: usize,
    id: IssueId,
}

#[derive(Debug)]
pub struct IssueListPage {
    ctx: PageContext,
    list_loads: LoadSequencer,
    detail_loads: LoadSequencer,
    search: String,
    selected: Option<IssueId>,
    issues: Option<Vec<Issue>>,
    pages: i64,
    detail: Option<IssueDetail>,
    last_deleted: Option<Deleted>,
}

impl IssueListPage {
    /// Loader for the initial-data slot
    pub async fn fetch_data(
        client: &GraphQlClient,
        search: &str,
        selected: Option<IssueId>,
    ) -> Option<ListData> {
        queries::issue_list(client, &ListQuery::from_search(search), selected).await
    }

    /// Mount at `search`, selecting `selected`
    pub async fn mount(ctx: PageContext, search: &str, selected: Option<IssueId>) -> Self {
        let handed_off = ctx.scope().drain_as::<ListData>(HydrationSlot::InitialData);
        let mut page = Self {
            ctx,
            list_loads: LoadSequencer::new(),
            detail_loads: LoadSequencer::new(),
            search: search.to_string(),
            selected,
            issues: None,
            pages: 0,
            detail: None,
            last_deleted: None,
        };
        match handed_off {
            Some(data) => page.apply(data),
            None => page.load().await,
        }
        page
    }

    fn key(&self) -> ListKey {
        (self.search.clone(), self.selected)
    }

    fn apply(&mut self, data: ListData) {
        self.issues = Some(data.issue_list.issues);
        self.pages = data.issue_list.pages;
        self.detail = data.issue_get;
    }

    /// Take a ticket for a list load at the current search and selection
    pub fn begin_load(&self) -> LoadTicket<ListKey> {
        self.list_loads.begin(self.key())
    }

    /// Apply a finished list load; returns whether it was applied
    ///
    /// Stale tickets and failed loads leave the page as it was.
    pub fn finish_load(&mut self, ticket: &LoadTicket<ListKey>, data: Option<ListData>) -> bool {
        if !self.list_loads.accepts(ticket, &self.key()) {
            return false;
        }
        match data {
            Some(data) => {
                self.apply(data);
                true
            }
            None => false,
        }
    }

    /// Reload the list for the current search and selection
    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let data = Self::fetch_data(self.ctx.client(), &self.search, self.selected).await;
        self.finish_load(&ticket, data);
    }

    /// Take a ticket for a description load of the current selection
    pub fn begin_detail(&self) -> LoadTicket<Option<IssueId>> {
        self.detail_loads.begin(self.selected)
    }

    pub fn finish_detail(
        &mut self,
        ticket: &LoadTicket<Option<IssueId>>,
        data: Option<DetailData>,
    ) -> bool {
        if !self.detail_loads.accepts(ticket, &self.selected) {
            return false;
        }
        match data {
            Some(data) => {
                self.detail = data.issue_get;
                true
            }
            None => false,
        }
    }

    /// Reload the description pane
    pub async fn load_detail(&mut self) {
        let ticket = self.begin_detail();
        let Some(id) = self.selected else {
            // Nothing selected: clear without a round-trip
            self.finish_detail(&ticket, Some(DetailData { issue_get: None }));
            return;
        };
        let data = queries::issue_detail(self.ctx.client(), id).await;
        self.finish_detail(&ticket, data);
    }

    /// The location changed
    pub async fn navigate(&mut self, search: &str, selected: Option<IssueId>) {
        let search_changed = search != self.search;
        let selection_changed = selected != self.selected;
        self.search = search.to_string();
        self.selected = selected;
        if search_changed {
            self.load().await;
        } else if selection_changed {
            self.load_detail().await;
        }
    }

    /// Set the issue at `index` to Closed
    pub async fn close_issue(&mut self, index: usize) {
        let Some(issue) = self.issue_at(index) else {
            return;
        };
        let id = issue.id;
        if issue.status == IssueStatus::Closed {
            self.ctx.toasts().info(&format!("Issue {id} is already closed"));
            return;
        }
        let changes = IssueChanges::status(IssueStatus::Closed);
        match queries::issue_update(self.ctx.client(), id, &changes).await {
            Some(updated) => {
                if let Some(slot) = self.issues.as_mut().and_then(|issues| issues.get_mut(index)) {
                    *slot = updated;
                }
                self.ctx.toasts().success(&format!("Issue {id} closed"));
            }
            None => self.load().await,
        }
    }

    /// Delete the issue at `index`
    ///
    /// Navigates back to the bare list when the deleted issue was the
    /// selected one.
    pub async fn delete_issue(&mut self, index: usize) -> Option<Navigate> {
        let id = self.issue_at(index)?.id;
        let confirmed = queries::issue_delete(self.ctx.client(), id).await;
        if confirmed != Some(true) {
            self.load().await;
            return None;
        }

        if let Some(issues) = self.issues.as_mut() {
            if index < issues.len() && issues[index].id == id {
                issues.remove(index);
            }
        }
        self.last_deleted = Some(Deleted { index, id });
        self.ctx.toasts().success(&format!("Issue {id} deleted"));
        tracing::info!(%id, "issue deleted");

        (self.selected == Some(id)).then(|| Navigate::to(format!("{HOME}{}", self.search)))
    }

    /// Bring back the most recently deleted issue at its old position
    pub async fn restore_last_deleted(&mut self) -> bool {
        let Some(deleted) = self.last_deleted.clone() else {
            return false;
        };
        self.restore_issue(deleted.id, Some(deleted.index)).await
    }

    /// Restore `id`, inserting it at `index` (or the top)
    pub async fn restore_issue(&mut self, id: IssueId, index: Option<usize>) -> bool {
        let Some(restored) = queries::issue_restore(self.ctx.client(), id).await else {
            return false;
        };
        let issues = self.issues.get_or_insert_with(Vec::new);
        if let Some(existing) = issues.iter().position(|issue| issue.id == id) {
            // Already back, e.g. after a reload
            issues[existing] = restored;
        } else {
            let at = index.unwrap_or(0).min(issues.len());
            issues.insert(at, restored);
        }
        if self.last_deleted.as_ref().is_some_and(|d| d.id == id) {
            self.last_deleted = None;
        }
        self.ctx.toasts().success(&format!("Issue {id} restored"));
        true
    }

    /// Consumer is gone; in-flight loads are ignored when they land
    pub fn unmount(&self) {
        self.list_loads.close();
        self.detail_loads.close();
    }

    fn issue_at(&self, index: usize) -> Option<&Issue> {
        self.issues.as_ref().and_then(|issues| issues.get(index))
    }

    /// `None` until the first successful load
    #[inline]
    #[must_use]
    pub fn issues(&self) -> Option<&[Issue]> {
        self.issues.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn pages(&self) -> i64 {
        self.pages
    }

    #[inline]
    #[must_use]
    pub fn detail(&self) -> Option<&IssueDetail> {
        self.detail.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn selected(&self) -> Option<IssueId> {
        self.selected
    }

    #[inline]
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn query(&self) -> ListQuery {
        ListQuery::from_search(&self.search)
    }

    #[must_use]
    pub fn pagination(&self) -> PageSection {
        PageSection::around(self.query().page, self.pages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_section() {
        let section = PageSection::around(None, 12);
        assert_eq!(section.active, 1);
        assert_eq!(section.pages, vec![1, 2, 3, 4, 5]);
        assert_eq!(section.previous, None);
        assert_eq!(section.next, Some(6));
    }

    #[test]
    fn last_partial_section() {
        let section = PageSection::around(Some(12), 12);
        assert_eq!(section.pages, vec![11, 12]);
        assert_eq!(section.previous, Some(6));
        assert_eq!(section.next, None);
    }

    #[test]
    fn nonpositive_page_is_first() {
        assert_eq!(PageSection::around(Some(-3), 2).active, 1);
        assert_eq!(PageSection::around(Some(0), 0).pages, Vec::<i64>::new());
    }
}
