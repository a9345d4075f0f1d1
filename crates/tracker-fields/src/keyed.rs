//! Record-bound synchronizers
//!
//! Edit state belongs to the record it was typed against. Binding the field
//! to another record throws the old state away and seeds a fresh
//! synchronizer, so half-typed text for one issue can never surface on (or
//! be committed against) the next.

use crate::codec::FieldCodec;
use crate::sync::{FieldEvent, FieldSync};

/// A [`FieldSync`] tagged with the identity of the record it edits
#[derive(Debug, Clone)]
pub struct KeyedField<K, C: FieldCodec> {
    key: K,
    field: FieldSync<C>,
}

impl<K: PartialEq + Clone, C: FieldCodec + Clone> KeyedField<K, C> {
    /// Bind a fresh synchronizer to `key`
    #[must_use]
    pub fn new(key: K, field: FieldSync<C>) -> Self {
        Self { key, field }
    }

    /// Point the field at `key` with its canonical value
    ///
    /// Returns `true` when the key changed and the synchronizer was
    /// replaced. Same key only forwards the canonical value.
    pub fn rebind(&mut self, key: K, canonical: Option<C::Value>) -> bool {
        if key == self.key {
            self.field.sync_canonical(canonical);
            return false;
        }
        let blank_acceptable = self.field.blank_acceptable();
        self.field = FieldSync::new(self.field.codec().clone(), canonical)
            .with_blank_acceptable(blank_acceptable);
        self.key = key;
        true
    }

    /// Commit against the currently bound record
    pub fn on_commit(&mut self) -> (K, Vec<FieldEvent<C::Value>>) {
        (self.key.clone(), self.field.on_commit())
    }

    #[inline]
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    #[must_use]
    pub fn field(&self) -> &FieldSync<C> {
        &self.field
    }

    #[inline]
    pub fn field_mut(&mut self) -> &mut FieldSync<C> {
        &mut self.field
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{DateCodec, IntegerCodec};

    #[test]
    fn record_switch_discards_incomplete_text() {
        let due_a = DateCodec.parse("2024-01-01");
        let due_b = DateCodec.parse("2024-06-30");
        let mut field = KeyedField::new(7_i64, FieldSync::new(DateCodec, due_a));

        field.field_mut().on_focus();
        field.field_mut().on_keystroke("2024-01-0");
        assert_eq!(field.field().rendered(), "2024-01-0");

        assert!(field.rebind(8, due_b));
        assert_eq!(field.field().rendered(), "Sun Jun 30 2024");
        assert_eq!(field.field().edit_text(), "2024-06-30");
        assert!(!field.field().is_focused());

        let (key, events) = field.on_commit();
        assert_eq!(key, 8);
        assert_eq!(events, vec![FieldEvent::Committed(due_b)]);
    }

    #[test]
    fn record_switch_clears_invalid_state() {
        let mut field = KeyedField::new(1_i64, FieldSync::new(IntegerCodec, Some(3)));
        field.field_mut().on_focus();
        field.field_mut().on_keystroke("3x");
        field.on_commit();
        assert!(!field.field().is_valid());

        field.rebind(2, Some(9));
        assert!(field.field().is_valid());
        assert_eq!(field.field().rendered(), "9");
    }

    #[test]
    fn same_key_keeps_instance() {
        let mut field = KeyedField::new(1_i64, FieldSync::new(IntegerCodec, None).with_blank_acceptable(false));
        field.field_mut().on_focus();
        field.field_mut().on_keystroke("12");
        assert!(!field.rebind(1, Some(5)));
        assert_eq!(field.field().edit_text(), "12");
    }

    #[test]
    fn blank_policy_survives_rebind() {
        let mut field = KeyedField::new(1_i64, FieldSync::new(IntegerCodec, None).with_blank_acceptable(false));
        field.rebind(2, None);
        assert!(!field.field().blank_acceptable());
    }
}
