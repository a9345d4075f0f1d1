//! Filter panel shared by the list and report pages

use super::{Navigate, PageContext};
use tracker_fields::{FieldEvent, FieldSync, IntegerCodec, IntegerField};
use tracker_model::{IssueFilter, IssueStatus};

/// Editable copy of the filter in the URL
#[derive(Debug, Clone)]
pub struct FilterForm {
    base_path: String,
    status: Option<IssueStatus>,
    effort_min: IntegerField,
    effort_max: IntegerField,
    changed: bool,
}

impl FilterForm {
    /// Seed from the current search; applying navigates to `base_path`
    #[must_use]
    pub fn new(base_path: impl Into<String>, search: &str) -> Self {
        let filter = IssueFilter::from_search(search);
        Self {
            base_path: base_path.into(),
            status: filter.status,
            effort_min: FieldSync::new(IntegerCodec, filter.effort_min),
            effort_max: FieldSync::new(IntegerCodec, filter.effort_max),
            changed: false,
        }
    }

    /// The URL search changed under the form: show what it now says
    pub fn on_search_change(&mut self, search: &str) {
        *self = Self::new(std::mem::take(&mut self.base_path), search);
    }

    pub fn set_status(&mut self, status: Option<IssueStatus>) {
        self.status = status;
        self.changed = true;
    }

    pub fn effort_min_mut(&mut self) -> &mut IntegerField {
        self.changed = true;
        &mut self.effort_min
    }

    pub fn effort_max_mut(&mut self) -> &mut IntegerField {
        self.changed = true;
        &mut self.effort_max
    }

    /// Commit both effort inputs; returns whether both are valid
    pub fn commit_efforts(&mut self) -> bool {
        let min_ok = commit(&mut self.effort_min);
        let max_ok = commit(&mut self.effort_max);
        min_ok && max_ok
    }

    /// Filter as currently entered
    #[must_use]
    pub fn filter(&self) -> IssueFilter {
        IssueFilter {
            status: self.status,
            effort_min: self.effort_min.canonical().copied(),
            effort_max: self.effort_max.canonical().copied(),
        }
    }

    /// Navigate to the entered filter; refused while an effort is invalid
    pub fn apply(&mut self, ctx: &PageContext) -> Option<Navigate> {
        if !self.effort_min.is_valid() || !self.effort_max.is_valid() {
            ctx.toasts().error("Effort must be a whole number");
            return None;
        }
        let target = format!("{}{}", self.base_path, self.filter().to_search());
        self.changed = false;
        ctx.toasts().success("Filter applied");
        Some(Navigate(target))
    }

    /// Throw away edits and show the filter from `search` again
    pub fn reset(&mut self, ctx: &PageContext, search: &str) {
        self.on_search_change(search);
        ctx.toasts().info("Filter fields reset");
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<IssueStatus> {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn effort_min(&self) -> &IntegerField {
        &self.effort_min
    }

    #[inline]
    #[must_use]
    pub fn effort_max(&self) -> &IntegerField {
        &self.effort_max
    }

    /// Whether anything was edited since the last apply or reset
    #[inline]
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.changed
    }
}

fn commit(field: &mut IntegerField) -> bool {
    let events = field.on_commit();
    if let Some(FieldEvent::ValidityChanged(valid)) = events.first() {
        tracing::debug!(valid, "effort validity changed");
    }
    field.is_valid()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_from_search() {
        let form = FilterForm::new("/issues", "?status=Fixed&effortMin=2");
        assert_eq!(form.status(), Some(IssueStatus::Fixed));
        assert_eq!(form.effort_min().rendered(), "2");
        assert_eq!(form.effort_max().rendered(), "");
        assert!(!form.is_changed());
    }

    #[test]
    fn typed_efforts_build_filter() {
        let mut form = FilterForm::new("/issues", "");
        form.effort_min_mut().on_focus();
        form.effort_min_mut().on_keystroke("0");
        form.effort_max_mut().on_focus();
        form.effort_max_mut().on_keystroke("8");
        assert!(form.commit_efforts());

        let filter = form.filter();
        assert_eq!(filter.effort_min, Some(0));
        assert_eq!(filter.effort_max, Some(8));
        assert_eq!(filter.to_search(), "?effortMin=0&effortMax=8");
    }

    #[test]
    fn search_change_discards_edits() {
        let mut form = FilterForm::new("/report", "?effortMin=1");
        form.effort_min_mut().on_focus();
        form.effort_min_mut().on_keystroke("1x");
        assert!(!form.commit_efforts());

        form.on_search_change("?effortMin=4");
        assert!(form.effort_min().is_valid());
        assert_eq!(form.effort_min().rendered(), "4");
        assert!(!form.is_changed());
    }
}
