//! HTML document around a server-rendered body

use tracker_hydrate::EmbeddedGlobals;

/// Full page: body markup, `/env.js`, the hydration globals, then the bundle
#[must_use]
pub fn render_document(body: &str, globals: &EmbeddedGlobals) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Issue Tracker</title>
  </head>
  <body>
    <div id="contents">{body}</div>
    <script src="/env.js"></script>
    {script}
    <script src="/app.bundle.js"></script>
  </body>
</html>
"#,
        script = globals.render_element(),
    )
}

/// Escape text for element content and quoted attributes
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn document_embeds_globals_after_env() {
        let globals = EmbeddedGlobals::new(Some(json!({ "counts": [] })), None);
        let html = render_document("<h1>Report</h1>", &globals);

        let env = html.find("/env.js").unwrap();
        let data = html.find("window.__INITIAL_DATA__ = {\"counts\":[]};").unwrap();
        assert!(env < data);
        assert!(html.contains("window.__USER_DATA__ = null;"));
        assert_eq!(EmbeddedGlobals::parse(&html).unwrap(), globals);
    }
}
