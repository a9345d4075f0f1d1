//! Page Controller Tests
//!
//! Controllers against a scripted backend: handoff draining, fetch
//! fallback, stale-response handling and the user actions.

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracker_client::queries;
use tracker_client::ExecutionContext;
use tracker_hydrate::{HydrationScope, HydrationSlot};
use tracker_model::{IssueId, IssueStatus};
use tracker_test_utils::{
    issue_data_json, issue_json, list_data_json, scripted_client, user_data_json,
    ScriptedTransport,
};
use tracker_ui::pages::{
    EditField, EditState, FilterForm, IssueAddForm, IssueEditPage, IssueListPage,
    IssueReportPage, SearchBox, UserSession,
};
use tracker_ui::{Navigate, PageContext, ToastKind, ToastQueue};

fn context() -> (PageContext, Arc<ScriptedTransport>, Arc<ToastQueue>, Arc<HydrationScope>) {
    let (client, transport) = scripted_client(ExecutionContext::Client);
    let scope = Arc::new(HydrationScope::new());
    let toasts = Arc::new(ToastQueue::new());
    let ctx = PageContext::new(client, scope.clone(), toasts.clone());
    (ctx, transport, toasts, scope)
}

fn issue_ids(page: &IssueListPage) -> Vec<i64> {
    page.issues().unwrap().iter().map(|issue| issue.id.0).collect()
}

#[tokio::test]
async fn test_list_drains_handoff_without_fetching() {
    let (ctx, transport, _, scope) = context();
    scope
        .store(HydrationSlot::InitialData, list_data_json(&[1, 2], 3, Some(2)))
        .unwrap();

    let page = IssueListPage::mount(ctx.clone(), "", Some(IssueId(2))).await;
    assert_eq!(issue_ids(&page), vec![1, 2]);
    assert_eq!(page.pages(), 3);
    assert_eq!(page.detail().unwrap().id, IssueId(2));
    assert_eq!(transport.request_count(), 0);

    // A second consumer finds the slot empty and fetches
    transport.push_data(list_data_json(&[5], 1, None));
    let second = IssueListPage::mount(ctx, "", None).await;
    assert_eq!(issue_ids(&second), vec![5]);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_list_cold_start_fetches_with_filter() {
    let (ctx, transport, _, _) = context();
    transport.push_data(list_data_json(&[4], 1, Some(4)));

    let page = IssueListPage::mount(ctx, "?status=New&effortMin=2&page=1", Some(IssueId(4))).await;
    assert_eq!(issue_ids(&page), vec![4]);

    let variables = &transport.requests()[0].body["variables"];
    assert_eq!(
        *variables,
        json!({
            "status": "New", "effortMin": 2, "page": 1,
            "hasSelection": true, "selectedId": 4
        })
    );
}

#[tokio::test(start_paused = true)]
async fn test_list_keeps_newest_load_when_older_lands_last() {
    let (ctx, transport, _, scope) = context();
    scope
        .store(HydrationSlot::InitialData, list_data_json(&[9], 1, None))
        .unwrap();
    let mut page = IssueListPage::mount(ctx.clone(), "", None).await;

    transport.push_data_after(list_data_json(&[1], 1, None), Duration::from_millis(50));
    transport.push_data_after(list_data_json(&[2, 3], 1, None), Duration::from_millis(5));

    let ticket_a = page.begin_load();
    let ticket_b = page.begin_load();
    let (data_a, data_b) = tokio::join!(
        IssueListPage::fetch_data(ctx.client(), "", None),
        IssueListPage::fetch_data(ctx.client(), "", None),
    );

    assert!(page.finish_load(&ticket_b, data_b));
    assert!(!page.finish_load(&ticket_a, data_a));
    assert_eq!(issue_ids(&page), vec![2, 3]);
}

#[tokio::test]
async fn test_list_failed_reload_keeps_state() {
    let (ctx, transport, toasts, scope) = context();
    scope
        .store(HydrationSlot::InitialData, list_data_json(&[1, 2], 1, None))
        .unwrap();
    let mut page = IssueListPage::mount(ctx, "", None).await;

    transport.push_failure("connection reset");
    page.load().await;

    assert_eq!(issue_ids(&page), vec![1, 2]);
    assert_eq!(toasts.latest().unwrap().kind, ToastKind::Error);
}

#[tokio::test]
async fn test_list_selection_change_loads_only_detail() {
    let (ctx, transport, _, scope) = context();
    scope
        .store(HydrationSlot::InitialData, list_data_json(&[1, 2], 1, None))
        .unwrap();
    let mut page = IssueListPage::mount(ctx, "?status=New", None).await;

    transport.push_data(json!({ "issueGet": { "id": 2, "description": "second" } }));
    page.navigate("?status=New", Some(IssueId(2))).await;

    let request = &transport.requests()[0];
    assert_eq!(request.body["query"], json!(queries::ISSUE_DETAIL_QUERY));
    assert_eq!(page.detail().unwrap().description.as_deref(), Some("second"));

    // Clearing the selection needs no round-trip
    page.navigate("?status=New", None).await;
    assert!(page.detail().is_none());
    assert_eq!(transport.request_count(), 1);

    transport.push_data(list_data_json(&[3], 1, None));
    page.navigate("?status=Fixed", None).await;
    assert_eq!(transport.requests()[1].body["query"], json!(queries::ISSUE_LIST_QUERY));
    assert_eq!(issue_ids(&page), vec![3]);
}

#[tokio::test]
async fn test_list_close_issue() {
    let (ctx, transport, toasts, scope) = context();
    let mut data = list_data_json(&[1, 2], 1, None);
    data["issueList"]["issues"][1]["status"] = json!("Closed");
    scope.store(HydrationSlot::InitialData, data).unwrap();
    let mut page = IssueListPage::mount(ctx, "", None).await;

    page.close_issue(1).await;
    assert_eq!(transport.request_count(), 0);
    assert_eq!(toasts.latest().unwrap().kind, ToastKind::Info);

    let mut closed = issue_json(1);
    closed["status"] = json!("Closed");
    transport.push_data(json!({ "issueUpdate": closed }));
    page.close_issue(0).await;

    assert_eq!(page.issues().unwrap()[0].status, IssueStatus::Closed);
    assert_eq!(
        transport.requests()[0].body["variables"]["changes"],
        json!({ "status": "Closed" })
    );
    assert_eq!(toasts.latest().unwrap().kind, ToastKind::Success);
}

#[tokio::test]
async fn test_list_delete_selected_then_restore() {
    let (ctx, transport, _, scope) = context();
    scope
        .store(HydrationSlot::InitialData, list_data_json(&[1, 2, 3], 1, Some(2)))
        .unwrap();
    let mut page = IssueListPage::mount(ctx, "?status=Assigned", Some(IssueId(2))).await;

    transport.push_data(json!({ "issueDelete": true }));
    let nav = page.delete_issue(1).await;
    assert_eq!(nav, Some(Navigate::to("/issues?status=Assigned")));
    assert_eq!(issue_ids(&page), vec![1, 3]);

    transport.push_data(json!({ "issueRestore": issue_json(2) }));
    assert!(page.restore_last_deleted().await);
    assert_eq!(issue_ids(&page), vec![1, 2, 3]);
    assert!(!page.restore_last_deleted().await);
}

#[tokio::test]
async fn test_list_restore_does_not_duplicate() {
    let (ctx, transport, _, scope) = context();
    scope
        .store(HydrationSlot::InitialData, list_data_json(&[1, 2, 3], 1, None))
        .unwrap();
    let mut page = IssueListPage::mount(ctx, "", None).await;

    let mut restored = issue_json(2);
    restored["title"] = json!("Restored title");
    transport.push_data(json!({ "issueRestore": restored }));
    assert!(page.restore_issue(IssueId(2), Some(0)).await);

    assert_eq!(issue_ids(&page), vec![1, 2, 3]);
    assert_eq!(page.issues().unwrap()[1].title, "Restored title");
}

#[tokio::test]
async fn test_list_delete_unselected_stays() {
    let (ctx, transport, _, scope) = context();
    scope
        .store(HydrationSlot::InitialData, list_data_json(&[1, 2], 1, None))
        .unwrap();
    let mut page = IssueListPage::mount(ctx, "", None).await;

    transport.push_data(json!({ "issueDelete": true }));
    assert_eq!(page.delete_issue(0).await, None);
    assert_eq!(issue_ids(&page), vec![2]);
}

#[tokio::test]
async fn test_unmounted_list_ignores_late_response() {
    let (ctx, _, _, scope) = context();
    scope
        .store(HydrationSlot::InitialData, list_data_json(&[1], 1, None))
        .unwrap();
    let mut page = IssueListPage::mount(ctx, "", None).await;

    let ticket = page.begin_load();
    page.unmount();
    let applied = page.finish_load(
        &ticket,
        serde_json::from_value(list_data_json(&[7], 1, None)).ok(),
    );
    assert!(!applied);
    assert_eq!(issue_ids(&page), vec![1]);
}

#[tokio::test]
async fn test_edit_mount_from_handoff() {
    let (ctx, transport, _, scope) = context();
    scope.store(HydrationSlot::InitialData, issue_data_json(7)).unwrap();

    let page = IssueEditPage::mount(ctx, IssueId(7)).await;
    assert_eq!(transport.request_count(), 0);
    assert_eq!(page.rendered(EditField::Title), "Issue number 7");
    assert_eq!(page.rendered(EditField::Effort), "14");
    assert_eq!(page.rendered(EditField::Due), "Thu Feb 01 2024");
    assert_eq!(page.issue().unwrap().status, IssueStatus::Assigned);
}

#[tokio::test]
async fn test_edit_not_found() {
    let (ctx, transport, _, _) = context();
    transport.push_data(json!({ "issueGet": null }));

    let page = IssueEditPage::mount(ctx, IssueId(404)).await;
    assert_eq!(page.state(), &EditState::NotFound);
}

#[tokio::test]
async fn test_edit_record_switch_discards_partial_date() {
    let (ctx, transport, _, scope) = context();
    scope.store(HydrationSlot::InitialData, issue_data_json(7)).unwrap();
    let mut page = IssueEditPage::mount(ctx, IssueId(7)).await;

    page.focus(EditField::Due);
    assert!(page.keystroke(EditField::Due, "2024-01-0"));
    assert_eq!(page.rendered(EditField::Due), "2024-01-0");
    assert_eq!(page.placeholder(EditField::Due), Some("YYYY-MM-DD"));

    let mut other = issue_json(8);
    other["due"] = json!("2024-03-15T00:00:00.000Z");
    transport.push_data(json!({ "issueGet": other }));
    page.navigate(IssueId(8)).await;

    assert_eq!(page.rendered(EditField::Due), "Fri Mar 15 2024");
    assert_eq!(page.rendered(EditField::Title), "Issue number 8");
    assert!(page.validity().is_valid());
}

#[tokio::test]
async fn test_edit_failed_record_switch_shows_nothing_of_previous_issue() {
    let (ctx, transport, toasts, scope) = context();
    scope.store(HydrationSlot::InitialData, issue_data_json(7)).unwrap();
    let mut page = IssueEditPage::mount(ctx, IssueId(7)).await;

    page.focus(EditField::Due);
    page.keystroke(EditField::Due, "2024-01-0");

    transport.push_failure("connection reset");
    page.navigate(IssueId(8)).await;

    assert_eq!(page.id(), IssueId(8));
    assert_eq!(page.state(), &EditState::Loading);
    assert_eq!(page.issue(), None);
    for field in EditField::ALL {
        assert_eq!(page.rendered(field), "");
    }
    assert_eq!(toasts.latest().unwrap().kind, ToastKind::Error);

    // Nothing left to save, in particular not issue 7
    assert!(!page.apply_update().await);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_edit_whitespace_effort_is_invalid() {
    let (ctx, _, _, scope) = context();
    scope.store(HydrationSlot::InitialData, issue_data_json(3)).unwrap();
    let mut page = IssueEditPage::mount(ctx, IssueId(3)).await;

    page.focus(EditField::Effort);
    page.keystroke(EditField::Effort, "   ");
    page.commit(EditField::Effort);

    assert!(page.validity().is_invalid("effort"));
    assert_eq!(page.issue().unwrap().effort, Some(6));
    assert_eq!(page.rendered(EditField::Effort), "   ");
}

#[tokio::test]
async fn test_edit_invalid_effort_blocks_update() {
    let (ctx, transport, _, scope) = context();
    scope.store(HydrationSlot::InitialData, issue_data_json(3)).unwrap();
    let mut page = IssueEditPage::mount(ctx, IssueId(3)).await;

    page.focus(EditField::Effort);
    page.keystroke(EditField::Effort, "15a");
    page.commit(EditField::Effort);

    assert!(page.validity().is_invalid("effort"));
    assert_eq!(page.rendered(EditField::Effort), "15a");
    assert_eq!(page.issue().unwrap().effort, Some(6));

    assert!(!page.apply_update().await);
    assert!(page.validity().is_showing());
    assert_eq!(transport.request_count(), 0);

    page.focus(EditField::Effort);
    page.keystroke(EditField::Effort, "15");
    page.commit(EditField::Effort);
    assert!(page.validity().is_valid());
    assert_eq!(page.issue().unwrap().effort, Some(15));
}

#[tokio::test]
async fn test_edit_short_title_is_invalid() {
    let (ctx, _, _, scope) = context();
    scope.store(HydrationSlot::InitialData, issue_data_json(3)).unwrap();
    let mut page = IssueEditPage::mount(ctx, IssueId(3)).await;

    page.focus(EditField::Title);
    page.keystroke(EditField::Title, "ab");
    page.commit(EditField::Title);
    assert!(page.validity().is_invalid("title"));
    assert_eq!(page.issue().unwrap().title, "Issue number 3");

    page.focus(EditField::Title);
    page.keystroke(EditField::Title, "");
    page.commit(EditField::Title);
    assert!(page.validity().is_invalid("title"));

    page.focus(EditField::Title);
    page.keystroke(EditField::Title, "abc");
    page.commit(EditField::Title);
    assert!(page.validity().is_valid());
    assert_eq!(page.issue().unwrap().title, "abc");
}

#[tokio::test]
async fn test_edit_apply_update_sends_editable_fields() {
    let (ctx, transport, toasts, scope) = context();
    scope.store(HydrationSlot::InitialData, issue_data_json(3)).unwrap();
    let mut page = IssueEditPage::mount(ctx, IssueId(3)).await;

    page.focus(EditField::Owner);
    page.keystroke(EditField::Owner, "   ");
    page.commit(EditField::Owner);
    page.set_status(IssueStatus::Fixed);

    let mut saved = issue_json(3);
    saved["owner"] = json!(null);
    saved["status"] = json!("Fixed");
    transport.push_data(json!({ "issueUpdate": saved }));
    assert!(page.apply_update().await);

    let changes = &transport.requests()[0].body["variables"]["changes"];
    assert_eq!(changes["owner"], json!(null));
    assert_eq!(changes["status"], json!("Fixed"));
    assert!(changes.get("id").is_none());
    assert!(changes.get("created").is_none());
    assert_eq!(page.issue().unwrap().owner, None);
    assert_eq!(toasts.latest().unwrap().kind, ToastKind::Success);
}

#[tokio::test]
async fn test_report_counts_and_totals() {
    let (ctx, transport, _, _) = context();
    transport.push_data(json!({
        "counts": [
            { "owner": "Ada", "New": 1, "Assigned": 2, "Fixed": 0, "Closed": 4 },
            { "owner": null, "New": 3 }
        ]
    }));

    let page = IssueReportPage::mount(ctx, "?effortMax=5").await;
    assert_eq!(page.counts().unwrap().len(), 2);
    assert_eq!(page.totals(), [4, 2, 0, 4]);
    assert_eq!(
        transport.requests()[0].body["variables"],
        json!({ "effortMax": 5 })
    );
}

#[tokio::test]
async fn test_filter_apply_navigates() {
    let (ctx, _, toasts, _) = context();
    let mut form = FilterForm::new("/report", "?status=New");
    form.set_status(Some(IssueStatus::Fixed));
    form.effort_max_mut().on_focus();
    form.effort_max_mut().on_keystroke("9");
    assert!(form.commit_efforts());

    let nav = form.apply(&ctx).unwrap();
    assert_eq!(nav.path(), "/report?status=Fixed&effortMax=9");
    assert_eq!(toasts.latest().unwrap().kind, ToastKind::Success);

    form.effort_min_mut().on_focus();
    form.effort_min_mut().on_keystroke("-x");
    assert!(!form.commit_efforts());
    assert_eq!(form.apply(&ctx), None);
}

#[tokio::test]
async fn test_add_opens_editor() {
    let (ctx, transport, _, _) = context();
    let mut form = IssueAddForm::new();
    assert_eq!(form.submit(&ctx).await, None);
    assert_eq!(transport.request_count(), 0);

    form.title_mut().on_keystroke("Crash on save");
    form.owner_mut().on_keystroke("Ada");
    transport.push_data(json!({ "issueAdd": { "id": 17 } }));

    assert_eq!(form.submit(&ctx).await, Some(Navigate::to("/edit/17")));
    assert_eq!(
        transport.requests()[0].body["variables"],
        json!({ "issue": { "title": "Crash on save", "owner": "Ada" } })
    );
}

#[tokio::test]
async fn test_search_box() {
    let (ctx, transport, _, _) = context();
    let mut search = SearchBox::new();

    search.on_input(&ctx, "cr").await;
    assert!(search.hits().is_empty());

    transport.push_data(json!({ "issueSearch": [{ "id": 5, "title": "Crash on save" }] }));
    search.on_input(&ctx, "crash").await;
    assert_eq!(search.labels(), vec!["#5: Crash on save".to_string()]);
    assert_eq!(search.select(0), Some(Navigate::to("/edit/5")));
    assert_eq!(search.select(1), None);
}

#[tokio::test]
async fn test_session_from_handoff_and_sign_in() {
    let (ctx, transport, toasts, scope) = context();
    scope.store(HydrationSlot::UserData, user_data_json(None)).unwrap();

    let mut session = UserSession::mount(&ctx).await;
    assert!(!session.is_signed_in());
    assert_eq!(transport.request_count(), 0);

    let auth_transport = ScriptedTransport::new();
    let auth = tracker_client::AuthClient::new("http://auth.test/auth", auth_transport.clone());

    assert!(!session.sign_in(&ctx, &auth, "", "token").await);
    assert_eq!(toasts.latest().unwrap().kind, ToastKind::Error);
    assert_eq!(auth_transport.request_count(), 0);

    auth_transport.push_raw(r#"{"signedIn": true, "givenName": "Ada"}"#);
    assert!(session.sign_in(&ctx, &auth, "client.apps", "token").await);
    assert_eq!(session.user().unwrap().given_name.as_deref(), Some("Ada"));

    auth_transport.push_raw("{}");
    assert!(session.sign_out(&auth).await);
    assert!(!session.is_signed_in());
}
