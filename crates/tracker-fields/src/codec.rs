//! Value codecs for field synchronizers
//!
//! A codec converts between a canonical value and its editable and
//! displayable text. Parsing is total: bad input yields `None`.

use chrono::{DateTime, Utc};
use std::fmt::Debug;

/// Conversion rules for one kind of input
pub trait FieldCodec {
    /// Canonical value type
    type Value: Clone + PartialEq + Debug;

    /// Whether empty text is a valid "no value" by default
    const BLANK_ACCEPTABLE: bool = true;

    /// Parse edit text; `None` for blank or unparseable text
    fn parse(&self, text: &str) -> Option<Self::Value>;

    /// Whether `text` counts as "no value"
    ///
    /// Only empty text by default, so whitespace in a typed field is an
    /// invalid entry rather than a cleared one.
    fn is_blank(&self, text: &str) -> bool {
        text.is_empty()
    }

    /// Canonical value to editable text
    fn edit_format(&self, value: Option<&Self::Value>) -> String;

    /// Canonical value to idle display text
    fn display_format(&self, value: Option<&Self::Value>) -> String {
        self.edit_format(value)
    }

    /// Character-class gate applied to each keystroke
    fn accepts_keystroke(&self, _raw: &str) -> bool {
        true
    }

    /// Hint shown while the field has focus
    fn placeholder(&self) -> Option<&'static str> {
        None
    }
}

/// Free text; whitespace-only text means "no value"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextCodec;

impl FieldCodec for TextCodec {
    type Value = String;

    fn parse(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    fn is_blank(&self, text: &str) -> bool {
        text.trim().is_empty()
    }

    fn edit_format(&self, value: Option<&String>) -> String {
        value.cloned().unwrap_or_default()
    }
}

/// Calendar date typed as `YYYY-MM-DD`, shown as `Fri Jan 05 2024`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateCodec;

impl FieldCodec for DateCodec {
    type Value = DateTime<Utc>;

    fn parse(&self, text: &str) -> Option<DateTime<Utc>> {
        if text.len() != 10 {
            return None;
        }
        tracker_model::revive::parse_iso(text)
    }

    fn edit_format(&self, value: Option<&DateTime<Utc>>) -> String {
        value
            .map(|v| v.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    fn display_format(&self, value: Option<&DateTime<Utc>>) -> String {
        value
            .map(|v| v.format("%a %b %d %Y").to_string())
            .unwrap_or_default()
    }

    fn accepts_keystroke(&self, raw: &str) -> bool {
        raw.chars().all(|c| c.is_ascii_digit() || c == '-')
    }

    fn placeholder(&self) -> Option<&'static str> {
        Some("YYYY-MM-DD")
    }
}

/// Whole number, optionally signed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegerCodec;

impl FieldCodec for IntegerCodec {
    type Value = i64;

    fn parse(&self, text: &str) -> Option<i64> {
        let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        text.parse().ok()
    }

    fn edit_format(&self, value: Option<&i64>) -> String {
        value.map(ToString::to_string).unwrap_or_default()
    }
}
