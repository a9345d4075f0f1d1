//! Issue records and mutation payloads

use crate::error::ModelError;
use crate::revive;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::str::FromStr;

/// Backend-assigned issue identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(pub i64);

impl std::fmt::Display for IssueId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for IssueId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ModelError::InvalidId(s.to_string()))
    }
}

/// Workflow state of an issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueStatus {
    New,
    Assigned,
    Fixed,
    Closed,
}

impl IssueStatus {
    /// All states in workflow order
    pub const ALL: [IssueStatus; 4] = [Self::New, Self::Assigned, Self::Fixed, Self::Closed];

    /// Name used on the wire and in URLs
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Assigned => "Assigned",
            Self::Fixed => "Fixed",
            Self::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}

/// A tracked issue
///
/// List queries omit `description`, detail queries return it; every
/// nullable field therefore defaults to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub status: IssueStatus,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(with = "revive::date")]
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub effort: Option<i64>,
    #[serde(default, with = "revive::option_date")]
    pub due: Option<DateTime<Utc>>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Description pane of the selected issue on the list page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDetail {
    pub id: IssueId,
    #[serde(default)]
    pub description: Option<String>,
}

/// One page of the filtered issue list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct IssueList {
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub pages: i64,
}

/// Payload for `issueAdd`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

impl NewIssue {
    /// Create payload, treating a blank owner as unassigned
    #[must_use]
    pub fn new(title: impl Into<String>, owner: impl Into<String>) -> Self {
        let owner = owner.into();
        Self {
            title: title.into(),
            owner: if owner.trim().is_empty() { None } else { Some(owner) },
        }
    }
}

/// Partial update payload for `issueUpdate`
///
/// Outer `None` leaves a field untouched; `Some(None)` clears it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IssueChanges {
    pub status: Option<IssueStatus>,
    pub owner: Option<Option<String>>,
    pub effort: Option<Option<i64>>,
    pub due: Option<Option<DateTime<Utc>>>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
}

impl IssueChanges {
    /// Changes that rewrite every editable field from `issue`
    #[must_use]
    pub fn from_issue(issue: &Issue) -> Self {
        Self {
            status: Some(issue.status),
            owner: Some(issue.owner.clone()),
            effort: Some(issue.effort),
            due: Some(issue.due),
            title: Some(issue.title.clone()),
            description: Some(issue.description.clone()),
        }
    }

    /// Change only the status
    #[must_use]
    pub fn status(status: IssueStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

impl Serialize for IssueChanges {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(status) = self.status {
            map.serialize_entry("status", &status)?;
        }
        if let Some(owner) = &self.owner {
            map.serialize_entry("owner", owner)?;
        }
        if let Some(effort) = &self.effort {
            map.serialize_entry("effort", effort)?;
        }
        if let Some(due) = &self.due {
            map.serialize_entry("due", &due.as_ref().map(revive::to_iso))?;
        }
        if let Some(title) = &self.title {
            map.serialize_entry("title", title)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.end()
    }
}

/// Per-owner issue counts for the report page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerCounts {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(rename = "New", default)]
    pub new: i64,
    #[serde(rename = "Assigned", default)]
    pub assigned: i64,
    #[serde(rename = "Fixed", default)]
    pub fixed: i64,
    #[serde(rename = "Closed", default)]
    pub closed: i64,
}

impl OwnerCounts {
    /// Count for one status
    #[must_use]
    pub fn count(&self, status: IssueStatus) -> i64 {
        match status {
            IssueStatus::New => self.new,
            IssueStatus::Assigned => self.assigned,
            IssueStatus::Fixed => self.fixed,
            IssueStatus::Closed => self.closed,
        }
    }

    #[must_use]
    pub fn total(&self) -> i64 {
        IssueStatus::ALL.into_iter().map(|s| self.count(s)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn issue_revives_dates() {
        let issue: Issue = serde_json::from_value(json!({
            "id": 7,
            "status": "Assigned",
            "owner": "Eddie",
            "created": "2024-01-01T00:00:00.000Z",
            "effort": 5,
            "due": "2024-01-20T00:00:00.000Z",
            "title": "Missing bottom border on panel",
        }))
        .unwrap();

        assert_eq!(issue.id, IssueId(7));
        assert_eq!(revive::to_iso(&issue.due.unwrap()), "2024-01-20T00:00:00.000Z");
        assert!(issue.description.is_none());
    }

    #[test]
    fn issue_rejects_garbage_date() {
        let result = serde_json::from_value::<Issue>(json!({
            "id": 1, "status": "New", "created": "yesterday", "title": "x",
        }));
        assert!(result.is_err());
    }

    #[test]
    fn status_parse_and_display() {
        assert_eq!("Fixed".parse::<IssueStatus>().unwrap(), IssueStatus::Fixed);
        assert!("fixed".parse::<IssueStatus>().is_err());
        assert_eq!(IssueStatus::Closed.to_string(), "Closed");
    }

    #[test]
    fn changes_serialize_only_touched_fields() {
        let changes = IssueChanges::status(IssueStatus::Closed);
        assert_eq!(serde_json::to_value(&changes).unwrap(), json!({ "status": "Closed" }));
    }

    #[test]
    fn changes_can_clear_fields() {
        let changes = IssueChanges {
            owner: Some(None),
            due: Some(None),
            ..IssueChanges::default()
        };
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({ "owner": null, "due": null })
        );
    }

    #[test]
    fn new_issue_drops_blank_owner() {
        let issue = NewIssue::new("Crash on save", "   ");
        assert_eq!(serde_json::to_value(&issue).unwrap(), json!({ "title": "Crash on save" }));
    }

    #[test]
    fn owner_counts_total() {
        let row: OwnerCounts = serde_json::from_value(json!({
            "owner": "Ravan", "New": 2, "Assigned": 1, "Closed": 4,
        }))
        .unwrap();
        assert_eq!(row.fixed, 0);
        assert_eq!(row.total(), 7);
    }
}
