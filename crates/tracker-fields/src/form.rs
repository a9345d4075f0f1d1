//! Form-level validity bookkeeping
//!
//! Collects the validity transitions reported by a form's fields and
//! decides whether the "please correct errors" banner is showing.

use std::collections::BTreeSet;

/// Set of currently invalid fields plus banner state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValidity {
    invalid: BTreeSet<String>,
    showing: bool,
}

impl FormValidity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field's validity transition
    ///
    /// The banner shows while at least one field is invalid.
    pub fn on_validity_change(&mut self, field: &str, valid: bool) {
        if valid {
            self.invalid.remove(field);
        } else {
            self.invalid.insert(field.to_string());
        }
        self.showing = !self.invalid.is_empty();
    }

    /// Force the banner on (submit attempted while invalid)
    pub fn show(&mut self) {
        self.showing = true;
    }

    /// User dismissed the banner
    pub fn dismiss(&mut self) {
        self.showing = false;
    }

    /// Forget everything (fresh record loaded)
    pub fn reset(&mut self) {
        self.invalid.clear();
        self.showing = false;
    }

    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn is_invalid(&self, field: &str) -> bool {
        self.invalid.contains(field)
    }

    #[inline]
    #[must_use]
    pub fn is_showing(&self) -> bool {
        self.showing
    }

    /// Invalid field names in sorted order
    pub fn invalid_fields(&self) -> impl Iterator<Item = &str> {
        self.invalid.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_invalid_fields() {
        let mut form = FormValidity::new();
        form.on_validity_change("due", false);
        form.on_validity_change("effort", false);
        assert!(!form.is_valid());
        assert!(form.is_showing());
        assert_eq!(form.invalid_fields().collect::<Vec<_>>(), vec!["due", "effort"]);

        form.on_validity_change("due", true);
        assert!(form.is_invalid("effort"));
        assert!(form.is_showing());

        form.on_validity_change("effort", true);
        assert!(form.is_valid());
        assert!(!form.is_showing());
    }

    #[test]
    fn dismiss_and_show() {
        let mut form = FormValidity::new();
        form.on_validity_change("title", false);
        form.dismiss();
        assert!(!form.is_showing());
        form.show();
        assert!(form.is_showing());
        form.reset();
        assert!(form.is_valid());
        assert!(!form.is_showing());
    }
}
