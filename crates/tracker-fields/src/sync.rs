//! The field synchronizer state machine

use crate::codec::FieldCodec;

/// Notification for the owning form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent<T> {
    /// Validity flipped on this commit
    ValidityChanged(bool),
    /// A valid value was committed (`None` for an accepted blank)
    Committed(Option<T>),
}

/// Editable state for one rendered input
///
/// Owned by exactly one input. Created from the canonical value when the
/// input mounts and dropped when it unmounts.
#[derive(Debug, Clone)]
pub struct FieldSync<C: FieldCodec> {
    codec: C,
    canonical: Option<C::Value>,
    edit_text: String,
    focused: bool,
    valid: bool,
    blank_acceptable: bool,
}

impl<C: FieldCodec> FieldSync<C> {
    /// Seed a synchronizer from the canonical value
    #[must_use]
    pub fn new(codec: C, canonical: Option<C::Value>) -> Self {
        let edit_text = codec.edit_format(canonical.as_ref());
        Self {
            codec,
            canonical,
            edit_text,
            focused: false,
            valid: true,
            blank_acceptable: C::BLANK_ACCEPTABLE,
        }
    }

    /// Override whether blank text is a valid "no value"
    #[must_use]
    pub fn with_blank_acceptable(mut self, blank_acceptable: bool) -> Self {
        self.blank_acceptable = blank_acceptable;
        self
    }

    /// Input gained focus
    pub fn on_focus(&mut self) {
        self.focused = true;
    }

    /// Raw text changed; returns whether the keystroke was accepted
    pub fn on_keystroke(&mut self, raw: &str) -> bool {
        if !self.codec.accepts_keystroke(raw) {
            return false;
        }
        raw.clone_into(&mut self.edit_text);
        true
    }

    /// Input lost focus: validate and report
    ///
    /// An invalid commit leaves the canonical value alone and keeps the
    /// typed text on screen until it is fixed.
    pub fn on_commit(&mut self) -> Vec<FieldEvent<C::Value>> {
        let parsed = self.codec.parse(&self.edit_text);
        let blank = self.codec.is_blank(&self.edit_text);
        let valid = (self.blank_acceptable && blank) || parsed.is_some();

        let mut events = Vec::with_capacity(2);
        if valid != self.valid {
            events.push(FieldEvent::ValidityChanged(valid));
        }
        if valid {
            self.canonical.clone_from(&parsed);
            events.push(FieldEvent::Committed(parsed));
        }
        self.focused = false;
        self.valid = valid;
        events
    }

    /// The form changed the canonical value without a record switch
    ///
    /// An idle, valid field re-seeds its edit text; a focused or invalid
    /// one keeps what the user typed.
    pub fn sync_canonical(&mut self, canonical: Option<C::Value>) {
        if !self.focused && self.valid {
            self.edit_text = self.codec.edit_format(canonical.as_ref());
        }
        self.canonical = canonical;
    }

    /// Text the input should show right now
    #[must_use]
    pub fn rendered(&self) -> String {
        if self.focused || !self.valid {
            self.edit_text.clone()
        } else {
            self.codec.display_format(self.canonical.as_ref())
        }
    }

    /// Placeholder hint, only while focused
    #[must_use]
    pub fn placeholder(&self) -> Option<&'static str> {
        if self.focused {
            self.codec.placeholder()
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn canonical(&self) -> Option<&C::Value> {
        self.canonical.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn edit_text(&self) -> &str {
        &self.edit_text
    }

    #[inline]
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Result of the last commit (true before any commit)
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    #[must_use]
    pub fn blank_acceptable(&self) -> bool {
        self.blank_acceptable
    }

    #[inline]
    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }
}
