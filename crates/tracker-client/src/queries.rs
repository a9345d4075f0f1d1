//! Typed backend operations
//!
//! Each operation pairs a query document with the shape of its `data`.
//! The `*Data` types are also what page loaders hand to the hydration
//! handoff, so server and browser decode the same structure.
//!
//! Every function returns `None` when the round-trip produced no data.

use crate::graphql::GraphQlClient;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracker_model::{
    Issue, IssueChanges, IssueDetail, IssueFilter, IssueId, IssueList, ListQuery, NewIssue,
    OwnerCounts, User,
};

pub const ISSUE_LIST_QUERY: &str = r"
query ListAndDetail(
  $status: StatusType, $page: Int, $effortMin: Int, $effortMax: Int,
  $hasSelection: Boolean!, $selectedId: Int!
) {
  issueList(status: $status, page: $page, effortMin: $effortMin, effortMax: $effortMax) {
    issues { id owner status created due effort title }
    pages
  }
  issueGet(id: $selectedId) @include(if: $hasSelection) { id description }
}";

pub const ISSUE_DETAIL_QUERY: &str = r"
query LoadDetail($id: Int!) {
  issueGet(id: $id) { id description }
}";

pub const ISSUE_GET_QUERY: &str = r"
query GetIssue($id: Int!) {
  issueGet(id: $id) { id status owner created effort due title description }
}";

pub const ISSUE_UPDATE_MUTATION: &str = r"
mutation UpdateIssue($id: Int!, $changes: IssueInputChange!) {
  issueUpdate(id: $id, changes: $changes) { id status owner created effort due title description }
}";

pub const ISSUE_ADD_MUTATION: &str = r"
mutation AddIssue($issue: InputNewIssue!) {
  issueAdd(issue: $issue) { id }
}";

pub const ISSUE_DELETE_MUTATION: &str = r"
mutation DeleteIssue($id: Int!) {
  issueDelete(id: $id)
}";

pub const ISSUE_RESTORE_MUTATION: &str = r"
mutation RestoreIssue($id: Int!) {
  issueRestore(id: $id) { id status owner created effort due title description }
}";

pub const COUNTS_QUERY: &str = r"
query CountReport($status: StatusType, $effortMin: Int, $effortMax: Int) {
  counts(status: $status, effortMin: $effortMin, effortMax: $effortMax) {
    owner New Assigned Fixed Closed
  }
}";

pub const SEARCH_QUERY: &str = r"
query Search($search: String!) {
  issueSearch(search: $search) { id title }
}";

pub const USER_QUERY: &str = r"
query {
  user { signedIn givenName }
}";

/// Minimum term length before search hits the backend
pub const MIN_SEARCH_LEN: usize = 3;

/// `data` of the list page query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListData {
    #[serde(default)]
    pub issue_list: IssueList,
    #[serde(default)]
    pub issue_get: Option<IssueDetail>,
}

/// `data` of the selected-issue detail query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailData {
    #[serde(default)]
    pub issue_get: Option<IssueDetail>,
}

/// `data` of the edit page query; `issue_get: None` means no such issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueData {
    #[serde(default)]
    pub issue_get: Option<Issue>,
}

/// `data` of the report query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountsData {
    #[serde(default)]
    pub counts: Vec<OwnerCounts>,
}

/// `data` of the session query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub user: User,
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: IssueId,
    pub title: String,
}

impl SearchHit {
    /// Label shown in the search dropdown
    #[must_use]
    pub fn label(&self) -> String {
        format!("#{}: {}", self.id, self.title)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchData {
    #[serde(default)]
    issue_search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateData {
    issue_update: Option<Issue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RestoreData {
    issue_restore: Option<Issue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddData {
    issue_add: AddedId,
}

#[derive(Debug, Deserialize)]
struct AddedId {
    id: IssueId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteData {
    #[serde(default)]
    issue_delete: bool,
}

/// Variables for the list query
#[must_use]
pub fn list_variables(query: &ListQuery, selected: Option<IssueId>) -> Value {
    let mut vars = query.to_variables();
    vars.insert("hasSelection".into(), Value::from(selected.is_some()));
    vars.insert("selectedId".into(), Value::from(selected.map_or(0, |id| id.0)));
    Value::Object(vars)
}

/// Filtered issue page plus the selected issue's description
pub async fn issue_list(
    client: &GraphQlClient,
    query: &ListQuery,
    selected: Option<IssueId>,
) -> Option<ListData> {
    client
        .fetch("issueList", ISSUE_LIST_QUERY, list_variables(query, selected))
        .await
}

pub async fn issue_detail(client: &GraphQlClient, id: IssueId) -> Option<DetailData> {
    client
        .fetch("issueDetail", ISSUE_DETAIL_QUERY, json!({ "id": id }))
        .await
}

pub async fn issue_get(client: &GraphQlClient, id: IssueId) -> Option<IssueData> {
    client
        .fetch("issueGet", ISSUE_GET_QUERY, json!({ "id": id }))
        .await
}

/// Apply `changes`; returns the updated issue
pub async fn issue_update(
    client: &GraphQlClient,
    id: IssueId,
    changes: &IssueChanges,
) -> Option<Issue> {
    client
        .fetch::<UpdateData>(
            "issueUpdate",
            ISSUE_UPDATE_MUTATION,
            json!({ "id": id, "changes": changes }),
        )
        .await
        .and_then(|data| data.issue_update)
}

/// Create an issue; returns its id
pub async fn issue_add(client: &GraphQlClient, issue: &NewIssue) -> Option<IssueId> {
    client
        .fetch::<AddData>("issueAdd", ISSUE_ADD_MUTATION, json!({ "issue": issue }))
        .await
        .map(|data| data.issue_add.id)
}

/// Delete an issue; `Some(true)` when the backend confirmed
pub async fn issue_delete(client: &GraphQlClient, id: IssueId) -> Option<bool> {
    client
        .fetch::<DeleteData>("issueDelete", ISSUE_DELETE_MUTATION, json!({ "id": id }))
        .await
        .map(|data| data.issue_delete)
}

/// Bring a deleted issue back
pub async fn issue_restore(client: &GraphQlClient, id: IssueId) -> Option<Issue> {
    client
        .fetch::<RestoreData>("issueRestore", ISSUE_RESTORE_MUTATION, json!({ "id": id }))
        .await
        .and_then(|data| data.issue_restore)
}

/// Per-owner status counts
pub async fn counts(client: &GraphQlClient, filter: &IssueFilter) -> Option<CountsData> {
    client
        .fetch("counts", COUNTS_QUERY, Value::Object(filter.to_variables()))
        .await
}

/// Title search; short terms return no hits without a round-trip
pub async fn issue_search(client: &GraphQlClient, term: &str) -> Vec<SearchHit> {
    if term.chars().count() < MIN_SEARCH_LEN {
        return Vec::new();
    }
    client
        .fetch::<SearchData>("issueSearch", SEARCH_QUERY, json!({ "search": term }))
        .await
        .map(|data| data.issue_search)
        .unwrap_or_default()
}

pub async fn current_user(client: &GraphQlClient) -> Option<UserData> {
    client.fetch("user", USER_QUERY, Value::Null).await
}
