//! Title search box in the navigation bar

use super::{Navigate, PageContext};
use crate::routes::edit_path;
use tracker_client::queries::{self, SearchHit};
use tracker_client::LoadSequencer;

#[derive(Debug, Default)]
pub struct SearchBox {
    loads: LoadSequencer,
    term: String,
    hits: Vec<SearchHit>,
}

impl SearchBox {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Term typed; short terms clear the dropdown without a round-trip
    pub async fn on_input(&mut self, ctx: &PageContext, term: &str) {
        self.term = term.to_string();
        let ticket = self.loads.begin(self.term.clone());
        let hits = queries::issue_search(ctx.client(), term).await;
        if self.loads.accepts(&ticket, &self.term) {
            self.hits = hits;
        }
    }

    /// Open the chosen hit in the editor
    #[must_use]
    pub fn select(&self, index: usize) -> Option<Navigate> {
        self.hits.get(index).map(|hit| Navigate::to(edit_path(hit.id)))
    }

    /// Dropdown labels
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.hits.iter().map(SearchHit::label).collect()
    }

    #[inline]
    #[must_use]
    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }
}
