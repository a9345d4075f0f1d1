//! Issue edit page
//!
//! Loads one issue by id and edits it through record-bound field
//! synchronizers. Every field is keyed by the issue id, so navigating to
//! another issue throws away whatever was half-typed for the previous one.
//!
//! Saving is blocked while any field is invalid; the form then shows its
//! validity banner instead of sending the update.

use super::PageContext;
use tracker_client::queries::{self, IssueData};
use tracker_client::{GraphQlClient, LoadSequencer, LoadTicket};
use tracker_fields::{
    DateCodec, FieldCodec, FieldEvent, FieldSync, FormValidity, IntegerCodec, KeyedField,
    TextCodec,
};
use tracker_hydrate::HydrationSlot;
use tracker_model::{Issue, IssueChanges, IssueId, IssueStatus};

/// Shortest accepted title
pub const MIN_TITLE_LEN: usize = 3;

/// The synchronized inputs of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditField {
    Owner,
    Effort,
    Due,
    Title,
    Description,
}

impl EditField {
    pub const ALL: [EditField; 5] = [
        Self::Owner,
        Self::Effort,
        Self::Due,
        Self::Title,
        Self::Description,
    ];

    /// Input name, also the key in the invalid-field set
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Effort => "effort",
            Self::Due => "due",
            Self::Title => "title",
            Self::Description => "description",
        }
    }
}

/// Where the page is in its load cycle
#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    Loading,
    NotFound,
    Loaded(Issue),
}

#[derive(Debug)]
pub struct IssueEditPage {
    ctx: PageContext,
    loads: LoadSequencer,
    id: IssueId,
    state: EditState,
    owner: KeyedField<IssueId, TextCodec>,
    effort: KeyedField<IssueId, IntegerCodec>,
    due: KeyedField<IssueId, DateCodec>,
    title: KeyedField<IssueId, TextCodec>,
    description: KeyedField<IssueId, TextCodec>,
    validity: FormValidity,
}

fn keyed<C: FieldCodec + Clone>(id: IssueId, codec: C) -> KeyedField<IssueId, C> {
    KeyedField::new(id, FieldSync::new(codec, None))
}

impl IssueEditPage {
    /// Loader for the initial-data slot
    pub async fn fetch_data(client: &GraphQlClient, id: IssueId) -> Option<IssueData> {
        queries::issue_get(client, id).await
    }

    pub async fn mount(ctx: PageContext, id: IssueId) -> Self {
        let handed_off = ctx.scope().drain_as::<IssueData>(HydrationSlot::InitialData);
        let mut page = Self {
            ctx,
            loads: LoadSequencer::new(),
            id,
            state: EditState::Loading,
            owner: keyed(id, TextCodec),
            effort: keyed(id, IntegerCodec),
            due: keyed(id, DateCodec),
            title: KeyedField::new(id, FieldSync::new(TextCodec, None).with_blank_acceptable(false)),
            description: keyed(id, TextCodec),
            validity: FormValidity::new(),
        };
        match handed_off {
            Some(data) => page.apply(data),
            None => page.load().await,
        }
        page
    }

    fn apply(&mut self, data: IssueData) {
        self.validity.reset();
        match data.issue_get {
            Some(issue) => {
                self.bind_fields(&issue);
                self.state = EditState::Loaded(issue);
            }
            None => {
                tracing::debug!(id = %self.id, "issue not found");
                self.state = EditState::NotFound;
            }
        }
    }

    /// Point every field at `issue`; fresh synchronizers on a record switch
    fn bind_fields(&mut self, issue: &Issue) {
        self.owner.rebind(issue.id, issue.owner.clone());
        self.effort.rebind(issue.id, issue.effort);
        self.due.rebind(issue.id, issue.due);
        self.title.rebind(issue.id, Some(issue.title.clone()));
        self.description.rebind(issue.id, issue.description.clone());
    }

    pub fn begin_load(&self) -> LoadTicket<IssueId> {
        self.loads.begin(self.id)
    }

    /// Apply a finished load; a failed load keeps what is on screen
    pub fn finish_load(&mut self, ticket: &LoadTicket<IssueId>, data: Option<IssueData>) -> bool {
        if !self.loads.accepts(ticket, &self.id) {
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

    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let data = Self::fetch_data(self.ctx.client(), self.id).await;
        self.finish_load(&ticket, data);
    }

    /// The id in the path changed
    pub async fn navigate(&mut self, id: IssueId) {
        if id == self.id {
            return;
        }
        self.id = id;
        self.clear();
        self.load().await;
    }

    /// Forget the previous record before the next one arrives, so a failed
    /// load shows nothing of it and cannot save it
    fn clear(&mut self) {
        self.state = EditState::Loading;
        self.validity.reset();
        let id = self.id;
        self.owner.rebind(id, None);
        self.effort.rebind(id, None);
        self.due.rebind(id, None);
        self.title.rebind(id, None);
        self.description.rebind(id, None);
    }

    pub fn focus(&mut self, field: EditField) {
        match field {
            EditField::Owner => self.owner.field_mut().on_focus(),
            EditField::Effort => self.effort.field_mut().on_focus(),
            EditField::Due => self.due.field_mut().on_focus(),
            EditField::Title => self.title.field_mut().on_focus(),
            EditField::Description => self.description.field_mut().on_focus(),
        }
    }

    /// Returns whether the keystroke was accepted
    pub fn keystroke(&mut self, field: EditField, raw: &str) -> bool {
        match field {
            EditField::Owner => self.owner.field_mut().on_keystroke(raw),
            EditField::Effort => self.effort.field_mut().on_keystroke(raw),
            EditField::Due => self.due.field_mut().on_keystroke(raw),
            EditField::Title => self.title.field_mut().on_keystroke(raw),
            EditField::Description => self.description.field_mut().on_keystroke(raw),
        }
    }

    /// Input lost focus: validate and fold the value into the issue
    pub fn commit(&mut self, field: EditField) {
        let name = field.name();
        match field {
            EditField::Owner => {
                let (key, events) = self.owner.on_commit();
                for value in self.collect(name, key, events) {
                    self.edit_issue(key, |issue| issue.owner = value);
                }
            }
            EditField::Effort => {
                let (key, events) = self.effort.on_commit();
                for value in self.collect(name, key, events) {
                    self.edit_issue(key, |issue| issue.effort = value);
                }
            }
            EditField::Due => {
                let (key, events) = self.due.on_commit();
                for value in self.collect(name, key, events) {
                    self.edit_issue(key, |issue| issue.due = value);
                }
            }
            EditField::Title => {
                let (key, events) = self.title.on_commit();
                for value in self.collect(name, key, events) {
                    let title = value.unwrap_or_default();
                    let long_enough = title.trim().chars().count() >= MIN_TITLE_LEN;
                    if self.validity.is_invalid(name) == long_enough {
                        self.validity.on_validity_change(name, long_enough);
                    }
                    if long_enough {
                        self.edit_issue(key, |issue| issue.title = title);
                    }
                }
            }
            EditField::Description => {
                let (key, events) = self.description.on_commit();
                for value in self.collect(name, key, events) {
                    self.edit_issue(key, |issue| issue.description = value);
                }
            }
        }
    }

    /// Record validity transitions; return committed values
    fn collect<T>(&mut self, name: &str, key: IssueId, events: Vec<FieldEvent<T>>) -> Vec<Option<T>> {
        let mut committed = Vec::new();
        for event in events {
            match event {
                FieldEvent::ValidityChanged(valid) => self.validity.on_validity_change(name, valid),
                FieldEvent::Committed(value) if key == self.id => committed.push(value),
                FieldEvent::Committed(_) => {
                    tracing::debug!(%key, current = %self.id, "dropping commit for another issue");
                }
            }
        }
        committed
    }

    fn edit_issue(&mut self, key: IssueId, edit: impl FnOnce(&mut Issue)) {
        if let EditState::Loaded(issue) = &mut self.state {
            if issue.id == key {
                edit(issue);
            }
        }
    }

    /// Status is a plain select, not a synchronized input
    pub fn set_status(&mut self, status: IssueStatus) {
        if let EditState::Loaded(issue) = &mut self.state {
            issue.status = status;
        }
    }

    /// Save the edited issue; returns whether the backend accepted it
    pub async fn apply_update(&mut self) -> bool {
        if !self.validity.is_valid() {
            self.validity.show();
            return false;
        }
        let EditState::Loaded(issue) = &self.state else {
            return false;
        };
        let id = issue.id;
        let changes = IssueChanges::from_issue(issue);

        let Some(updated) = queries::issue_update(self.ctx.client(), id, &changes).await else {
            return false;
        };
        if updated.id != self.id {
            // Navigated away while saving
            return false;
        }
        self.bind_fields(&updated);
        self.state = EditState::Loaded(updated);
        self.validity.reset();
        self.ctx.toasts().success(&format!("Issue {id} updated"));
        tracing::info!(%id, "issue updated");
        true
    }

    pub fn dismiss_validity(&mut self) {
        self.validity.dismiss();
    }

    pub fn unmount(&self) {
        self.loads.close();
    }

    /// What the input for `field` shows right now
    #[must_use]
    pub fn rendered(&self, field: EditField) -> String {
        match field {
            EditField::Owner => self.owner.field().rendered(),
            EditField::Effort => self.effort.field().rendered(),
            EditField::Due => self.due.field().rendered(),
            EditField::Title => self.title.field().rendered(),
            EditField::Description => self.description.field().rendered(),
        }
    }

    #[must_use]
    pub fn placeholder(&self, field: EditField) -> Option<&'static str> {
        match field {
            EditField::Due => self.due.field().placeholder(),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> IssueId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &EditState {
        &self.state
    }

    #[must_use]
    pub fn issue(&self) -> Option<&Issue> {
        match &self.state {
            EditState::Loaded(issue) => Some(issue),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn validity(&self) -> &FormValidity {
        &self.validity
    }
}
