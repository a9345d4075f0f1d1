//! Issue filters carried in the URL search string
//!
//! The list and report pages share one filter; the list page adds a page
//! number. Parsing is lenient the way browsers parse integers: a leading
//! run of digits counts (`"12abc"` is 12), anything else drops the key.

use crate::issue::IssueStatus;
use serde_json::{Map, Value};

/// Status and effort-range filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IssueFilter {
    pub status: Option<IssueStatus>,
    pub effort_min: Option<i64>,
    pub effort_max: Option<i64>,
}

impl IssueFilter {
    /// Parse from a search string, with or without the leading `?`
    #[must_use]
    pub fn from_search(search: &str) -> Self {
        let mut filter = Self::default();
        for (key, value) in pairs(search) {
            match key.as_str() {
                "status" => filter.status = value.parse().ok(),
                "effortMin" => filter.effort_min = parse_leading_int(&value),
                "effortMax" => filter.effort_max = parse_leading_int(&value),
                _ => {}
            }
        }
        filter
    }

    /// Render as a search string (`""` when nothing is set)
    #[must_use]
    pub fn to_search(&self) -> String {
        let mut out = url::form_urlencoded::Serializer::new(String::new());
        if let Some(status) = self.status {
            out.append_pair("status", status.as_str());
        }
        if let Some(min) = self.effort_min {
            out.append_pair("effortMin", &min.to_string());
        }
        if let Some(max) = self.effort_max {
            out.append_pair("effortMax", &max.to_string());
        }
        let encoded = out.finish();
        if encoded.is_empty() {
            encoded
        } else {
            format!("?{encoded}")
        }
    }

    /// GraphQL variables for `issueList` / `counts`
    #[must_use]
    pub fn to_variables(&self) -> Map<String, Value> {
        let mut vars = Map::new();
        if let Some(status) = self.status {
            vars.insert("status".into(), Value::from(status.as_str()));
        }
        if let Some(min) = self.effort_min {
            vars.insert("effortMin".into(), Value::from(min));
        }
        if let Some(max) = self.effort_max {
            vars.insert("effortMax".into(), Value::from(max));
        }
        vars
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Filter plus page number for the list page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub filter: IssueFilter,
    pub page: Option<i64>,
}

impl ListQuery {
    #[must_use]
    pub fn from_search(search: &str) -> Self {
        let page = pairs(search)
            .into_iter()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| parse_leading_int(&v));
        Self {
            filter: IssueFilter::from_search(search),
            page,
        }
    }

    #[must_use]
    pub fn to_variables(&self) -> Map<String, Value> {
        let mut vars = self.filter.to_variables();
        if let Some(page) = self.page {
            vars.insert("page".into(), Value::from(page));
        }
        vars
    }
}

fn pairs(search: &str) -> Vec<(String, String)> {
    let query = search.strip_prefix('?').unwrap_or(search);
    url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect()
}

/// Integer prefix of `text`, ignoring leading whitespace
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| n * sign)
}
