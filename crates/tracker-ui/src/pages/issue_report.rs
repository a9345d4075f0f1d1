//! Per-owner status report

use super::PageContext;
use tracker_client::queries::{self, CountsData};
use tracker_client::{GraphQlClient, LoadSequencer};
use tracker_hydrate::HydrationSlot;
use tracker_model::{IssueFilter, IssueStatus, OwnerCounts};

#[derive(Debug)]
pub struct IssueReportPage {
    ctx: PageContext,
    loads: LoadSequencer,
    search: String,
    counts: Option<Vec<OwnerCounts>>,
}

impl IssueReportPage {
    /// Loader for the initial-data slot
    pub async fn fetch_data(client: &GraphQlClient, search: &str) -> Option<CountsData> {
        queries::counts(client, &IssueFilter::from_search(search)).await
    }

    pub async fn mount(ctx: PageContext, search: &str) -> Self {
        let handed_off = ctx.scope().drain_as::<CountsData>(HydrationSlot::InitialData);
        let mut page = Self {
            ctx,
            loads: LoadSequencer::new(),
            search: search.to_string(),
            counts: None,
        };
        match handed_off {
            Some(data) => page.counts = Some(data.counts),
            None => page.load().await,
        }
        page
    }

    pub async fn load(&mut self) {
        let ticket = self.loads.begin(self.search.clone());
        let data = Self::fetch_data(self.ctx.client(), &self.search).await;
        if !self.loads.accepts(&ticket, &self.search) {
            return;
        }
        if let Some(data) = data {
            self.counts = Some(data.counts);
        }
    }

    pub async fn navigate(&mut self, search: &str) {
        if search == self.search {
            return;
        }
        self.search = search.to_string();
        self.load().await;
    }

    pub fn unmount(&self) {
        self.loads.close();
    }

    /// `None` until the first successful load
    #[inline]
    #[must_use]
    pub fn counts(&self) -> Option<&[OwnerCounts]> {
        self.counts.as_deref()
    }

    /// Column totals in workflow order
    #[must_use]
    pub fn totals(&self) -> [i64; 4] {
        let rows = self.counts.as_deref().unwrap_or_default();
        IssueStatus::ALL.map(|status| rows.iter().map(|row| row.count(status)).sum())
    }

    #[inline]
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }
}
