//! Embedded-globals wire format
//!
//! The server render writes both slots into the page as
//!
//! ```text
//! <script id="__hydration__">
//! window.__INITIAL_DATA__ = {...};
//! window.__USER_DATA__ = {...};
//! </script>
//! ```
//!
//! The JSON is made script-safe so that no string value can close the
//! surrounding `<script>` element or break the statement. Reading only
//! looks inside that element, so page text that happens to spell out an
//! assignment is never mistaken for it. A slot with no
//! data is written as `null`; pages produced elsewhere may also leave it
//! `undefined` or out entirely, which reads back as absent.

use crate::error::{HydrationError, Result};
use crate::slot::HydrationSlot;
use serde::Serialize;
use serde_json::Value;

/// `id` of the script element carrying the globals
pub const SCRIPT_ID: &str = "__hydration__";

/// Values carried from the server render into the browser runtime
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbeddedGlobals {
    pub initial_data: Option<Value>,
    pub user_data: Option<Value>,
}

impl EmbeddedGlobals {
    #[must_use]
    pub fn new(initial_data: Option<Value>, user_data: Option<Value>) -> Self {
        Self {
            initial_data,
            user_data,
        }
    }

    /// Build from typed loader output
    pub fn from_typed<I: Serialize, U: Serialize>(
        initial_data: Option<&I>,
        user_data: Option<&U>,
    ) -> Result<Self> {
        Ok(Self::new(
            encode_slot(HydrationSlot::InitialData, initial_data)?,
            encode_slot(HydrationSlot::UserData, user_data)?,
        ))
    }

    #[must_use]
    pub fn get(&self, slot: HydrationSlot) -> Option<&Value> {
        match slot {
            HydrationSlot::InitialData => self.initial_data.as_ref(),
            HydrationSlot::UserData => self.user_data.as_ref(),
        }
    }

    /// Script body assigning both globals
    #[must_use]
    pub fn render_script(&self) -> String {
        let mut out = String::new();
        for slot in HydrationSlot::ALL {
            let json = self
                .get(slot)
                .map_or_else(|| "null".to_string(), script_safe_json);
            out.push_str("window.");
            out.push_str(slot.global_name());
            out.push_str(" = ");
            out.push_str(&json);
            out.push_str(";\n");
        }
        out
    }

    /// The `<script>` element embedded in the page
    #[must_use]
    pub fn render_element(&self) -> String {
        format!("<script id=\"{SCRIPT_ID}\">\n{}</script>", self.render_script())
    }

    /// Read the globals back out of a rendered page
    ///
    /// A page without the element, or an element without an assignment,
    /// is the cold-start case, not an error.
    pub fn parse(html: &str) -> Result<Self> {
        let mut globals = Self::default();
        let Some(script) = hydration_script(html) else {
            return Ok(globals);
        };
        for line in script.lines() {
            let Some((slot, value)) = read_assignment(line)? else {
                continue;
            };
            match slot {
                HydrationSlot::InitialData => globals.initial_data = value,
                HydrationSlot::UserData => globals.user_data = value,
            }
        }
        Ok(globals)
    }
}

/// JSON that can sit inside an inline `<script>`
#[must_use]
pub fn script_safe_json(value: &Value) -> String {
    let json = value.to_string();
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003C"),
            '>' => out.push_str("\\u003E"),
            '/' => out.push_str("\\u002F"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(ch),
        }
    }
    out
}

/// Serialize loader output for `slot`
pub fn encode_slot<T: Serialize>(slot: HydrationSlot, value: Option<&T>) -> Result<Option<Value>> {
    value
        .map(serde_json::to_value)
        .transpose()
        .map_err(|source| HydrationError::Encode { slot, source })
}

/// Body of the hydration element; script-safe JSON cannot contain `</`
fn hydration_script(html: &str) -> Option<&str> {
    let open = format!("<script id=\"{SCRIPT_ID}\">");
    let start = html.find(&open)? + open.len();
    let body = &html[start..];
    Some(body.find("</script>").map_or(body, |end| &body[..end]))
}

/// One `window.__NAME__ = <json>;` statement per line
///
/// Compact JSON never spans lines, so string values that merely mention a
/// global are never read as an assignment.
fn read_assignment(line: &str) -> Result<Option<(HydrationSlot, Option<Value>)>> {
    let Some(statement) = line.trim().strip_prefix("window.") else {
        return Ok(None);
    };
    let Some(slot) = HydrationSlot::ALL
        .into_iter()
        .find(|slot| statement.starts_with(slot.global_name()))
    else {
        return Ok(None);
    };
    let rest = statement[slot.global_name().len()..].trim_start();
    let Some(rest) = rest.strip_prefix('=') else {
        return Err(HydrationError::malformed(slot, "missing assignment"));
    };
    let rest = rest.trim();
    let rest = rest.strip_suffix(';').unwrap_or(rest).trim_end();
    if rest == "undefined" {
        return Ok(Some((slot, None)));
    }
    match serde_json::from_str::<Value>(rest) {
        Ok(Value::Null) => Ok(Some((slot, None))),
        Ok(value) => Ok(Some((slot, Some(value)))),
        Err(err) => Err(HydrationError::malformed(slot, err)),
    }
}
