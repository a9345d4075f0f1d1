//! Handoff Tests
//!
//! Server render to page to browser scope, end to end.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};
use tracker_hydrate::{script_safe_json, EmbeddedGlobals, HydrationScope, HydrationSlot};
use tracker_model::User;

fn page_with(globals: &EmbeddedGlobals) -> String {
    format!(
        "<!DOCTYPE html><html><body><div id=\"contents\"></div>\
         {}<script src=\"/env.js\"></script></body></html>",
        globals.render_element()
    )
}

#[test]
fn test_browser_scope_drains_what_server_stored() {
    let user = User::signed_in("Ada");
    let data = json!({ "issueGet": { "id": 7, "title": "Crash on save" } });
    let globals = EmbeddedGlobals::from_typed(Some(&data), Some(&json!({ "user": user }))).unwrap();

    let page = page_with(&globals);
    let scope = HydrationScope::from_globals(EmbeddedGlobals::parse(&page).unwrap());

    assert_eq!(scope.drain(HydrationSlot::InitialData), Some(data));
    assert_eq!(scope.drain(HydrationSlot::InitialData), None);

    let user_data: Value = scope.drain_as(HydrationSlot::UserData).unwrap();
    assert_eq!(user_data["user"]["givenName"], json!("Ada"));
}

#[test]
fn test_cold_start_page_has_empty_slots() {
    let page = page_with(&EmbeddedGlobals::default());
    let scope = HydrationScope::from_globals(EmbeddedGlobals::parse(&page).unwrap());
    assert!(!scope.is_stored(HydrationSlot::InitialData));
    assert!(!scope.is_stored(HydrationSlot::UserData));
}

#[test]
fn test_scopes_are_isolated() {
    let a = HydrationScope::new();
    let b = HydrationScope::new();
    a.store(HydrationSlot::InitialData, json!(1)).unwrap();

    assert_ne!(a.id(), b.id());
    assert_eq!(b.drain(HydrationSlot::InitialData), None);
    assert_eq!(a.drain(HydrationSlot::InitialData), Some(json!(1)));
}

proptest! {
    #[test]
    fn prop_no_string_breaks_out_of_script(text in ".*") {
        let value = json!({ "title": text });
        let safe = script_safe_json(&value);
        prop_assert!(!safe.contains("</"));
        let line_separator = '\u{2028}';
        prop_assert!(!safe.contains(line_separator));
        let back: Value = serde_json::from_str(&safe).unwrap();
        prop_assert_eq!(back, value);
    }
}
