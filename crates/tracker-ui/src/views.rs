//! Server-side markup for each page
//!
//! Plain, unstyled HTML. The browser bundle takes over from here.

use crate::pages::{EditField, EditState, IssueEditPage, IssueListPage, IssueReportPage, UserSession};
use crate::routes::{edit_path, selected_path};
use crate::template::escape_html;
use std::fmt::Write;
use tracker_model::{revive, IssueStatus};

pub fn navigation(session: &UserSession) -> String {
    let who = match session.user() {
        Some(user) if user.signed_in => {
            format!("<span class=\"user\">{}</span>", escape_html(user.given_name.as_deref().unwrap_or("")))
        }
        _ => "<button class=\"sign-in\">Sign in</button>".to_string(),
    };
    format!(
        "<nav><a href=\"/issues\">Issue List</a> <a href=\"/report\">Report</a> {who}</nav>"
    )
}

pub fn issue_list(page: &IssueListPage) -> String {
    let Some(issues) = page.issues() else {
        return String::new();
    };
    let mut out = String::from(
        "<table class=\"issues\"><thead><tr><th>ID</th><th>Status</th><th>Owner</th>\
         <th>Created</th><th>Effort</th><th>Due Date</th><th>Title</th></tr></thead><tbody>",
    );
    for issue in issues {
        let _ = write!(
            out,
            "<tr><td><a href=\"{link}{search}\">{id}</a></td><td>{status}</td><td>{owner}</td>\
             <td>{created}</td><td>{effort}</td><td>{due}</td><td><a href=\"{edit}\">{title}</a></td></tr>",
            link = selected_path(issue.id),
            search = escape_html(page.search()),
            id = issue.id,
            status = issue.status,
            owner = escape_html(issue.owner.as_deref().unwrap_or("")),
            created = issue.created.format("%a %b %d %Y"),
            effort = issue.effort.map(|e| e.to_string()).unwrap_or_default(),
            due = issue.due.map(|d| d.format("%a %b %d %Y").to_string()).unwrap_or_default(),
            edit = edit_path(issue.id),
            title = escape_html(&issue.title),
        );
    }
    out.push_str("</tbody></table>");

    let section = page.pagination();
    out.push_str("<ul class=\"pagination\">");
    for number in &section.pages {
        let class = if *number == section.active { " class=\"active\"" } else { "" };
        let _ = write!(out, "<li{class}>{number}</li>");
    }
    out.push_str("</ul>");

    if let Some(detail) = page.detail() {
        let _ = write!(
            out,
            "<div class=\"detail\"><pre>{}</pre></div>",
            escape_html(detail.description.as_deref().unwrap_or(""))
        );
    }
    out
}

pub fn issue_edit(page: &IssueEditPage) -> String {
    let issue = match page.state() {
        EditState::Loading => return String::new(),
        EditState::NotFound => {
            return format!("<h1>Issue with ID {} not found</h1>", page.id());
        }
        EditState::Loaded(issue) => issue,
    };
    let mut out = format!(
        "<form class=\"issue-edit\"><h2>Editing issue: {}</h2><p>Created: {}</p>",
        issue.id,
        revive::to_iso(&issue.created)
    );
    out.push_str("<select name=\"status\">");
    for status in IssueStatus::ALL {
        let selected = if status == issue.status { " selected" } else { "" };
        let _ = write!(out, "<option value=\"{status}\"{selected}>{status}</option>");
    }
    out.push_str("</select>");
    for field in EditField::ALL {
        let name = field.name();
        let invalid = if page.validity().is_invalid(name) { " class=\"invalid\"" } else { "" };
        let _ = write!(
            out,
            "<input name=\"{name}\" value=\"{}\"{invalid}>",
            escape_html(&page.rendered(field))
        );
    }
    if page.validity().is_showing() {
        out.push_str("<div class=\"alert\">Please correct invalid fields before submitting.</div>");
    }
    out.push_str("<button type=\"submit\">Submit</button></form>");
    out
}

pub fn issue_report(page: &IssueReportPage) -> String {
    let Some(rows) = page.counts() else {
        return String::new();
    };
    let mut out = String::from("<table class=\"report\"><thead><tr><th></th>");
    for status in IssueStatus::ALL {
        let _ = write!(out, "<th>{status}</th>");
    }
    out.push_str("</tr></thead><tbody>");
    for row in rows {
        let _ = write!(out, "<tr><td>{}</td>", escape_html(row.owner.as_deref().unwrap_or("Unassigned")));
        for status in IssueStatus::ALL {
            let _ = write!(out, "<td>{}</td>", row.count(status));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

pub fn not_found() -> String {
    "<h1>Page Not Found</h1>".to_string()
}
