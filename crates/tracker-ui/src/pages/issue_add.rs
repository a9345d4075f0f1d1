//! New-issue dialog

use super::{Navigate, PageContext};
use crate::routes::edit_path;
use tracker_client::queries;
use tracker_fields::{FieldSync, TextCodec, TextField};
use tracker_model::NewIssue;

#[derive(Debug, Clone)]
pub struct IssueAddForm {
    title: TextField,
    owner: TextField,
}

impl Default for IssueAddForm {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueAddForm {
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: FieldSync::new(TextCodec, None).with_blank_acceptable(false),
            owner: FieldSync::new(TextCodec, None),
        }
    }

    pub fn title_mut(&mut self) -> &mut TextField {
        &mut self.title
    }

    pub fn owner_mut(&mut self) -> &mut TextField {
        &mut self.owner
    }

    /// Create the issue and open it in the editor
    ///
    /// A blank title is refused locally; the backend enforces the rest.
    pub async fn submit(&mut self, ctx: &PageContext) -> Option<Navigate> {
        self.title.on_commit();
        self.owner.on_commit();
        let Some(title) = self.title.canonical().filter(|_| self.title.is_valid()) else {
            ctx.toasts().error("Title is required");
            return None;
        };
        let issue = NewIssue::new(title.clone(), self.owner.canonical().cloned().unwrap_or_default());

        let id = queries::issue_add(ctx.client(), &issue).await?;
        ctx.toasts().success(&format!("Issue {id} added"));
        tracing::info!(%id, "issue added");
        *self = Self::new();
        Some(Navigate::to(edit_path(id)))
    }
}
