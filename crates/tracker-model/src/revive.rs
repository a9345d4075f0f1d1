//! Date revival for backend payloads
//!
//! The backend serializes dates as ISO-8601 strings. Anything that starts
//! with `YYYY-MM-DD` is revived into a `DateTime<Utc>`; full timestamps keep
//! their time component, bare dates become midnight UTC.
//!
//! The [`date`] and [`option_date`] modules plug this into serde via
//! `#[serde(with = "...")]`. Dates are written back out in the same
//! millisecond-precision `Z` form the backend produces.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d\d\d\d-\d\d-\d\d").expect("static pattern compiles"));

/// Whether `text` starts like an ISO date
#[inline]
#[must_use]
pub fn looks_like_iso_date(text: &str) -> bool {
    ISO_DATE_PREFIX.is_match(text)
}

/// Revive an ISO date or timestamp string
///
/// Returns `None` for anything that is not a date, never panics.
#[must_use]
pub fn parse_iso(text: &str) -> Option<DateTime<Utc>> {
    if !looks_like_iso_date(text) {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if text.len() == 10 {
        let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
        return Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?));
    }
    None
}

/// Render a timestamp the way the backend does (`2024-01-05T00:00:00.000Z`)
#[must_use]
pub fn to_iso(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serde adapter for required date fields
pub mod date {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_iso(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_iso(&text)
            .ok_or_else(|| de::Error::custom(format!("not an ISO date: '{text}'")))
    }
}

/// Serde adapter for nullable date fields
pub mod option_date {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => serializer.serialize_str(&super::to_iso(v)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(text) => super::parse_iso(&text)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("not an ISO date: '{text}'"))),
        }
    }
}
