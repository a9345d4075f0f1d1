//! Route table
//!
//! | path            | page            |
//! |-----------------|-----------------|
//! | `/`             | redirect to `/issues` |
//! | `/issues/:id?`  | issue list, optional selection |
//! | `/edit/:id`     | issue edit      |
//! | `/report`       | report          |
//! | anything else   | not found       |

use tracker_model::{parse_leading_int, IssueId};

/// Where unqualified visits are sent
pub const HOME: &str = "/issues";

/// A matched route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    IssueList { selected: Option<IssueId> },
    IssueEdit { id: IssueId },
    Report,
    Redirect(&'static str),
    NotFound,
}

impl Route {
    /// Match a request path (no search string)
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();
        match segments.as_slice() {
            [] | [""] => Self::Redirect(HOME),
            ["issues"] => Self::IssueList { selected: None },
            // A non-numeric selection still shows the list
            ["issues", id] => Self::IssueList {
                selected: parse_leading_int(id).map(IssueId),
            },
            ["edit", id] => parse_leading_int(id)
                .map_or(Self::NotFound, |id| Self::IssueEdit { id: IssueId(id) }),
            ["report"] => Self::Report,
            _ => Self::NotFound,
        }
    }

    /// Whether the page has a loader whose data goes into the handoff
    #[inline]
    #[must_use]
    pub fn has_loader(self) -> bool {
        matches!(self, Self::IssueList { .. } | Self::IssueEdit { .. } | Self::Report)
    }
}

/// Path of the edit page for `id`
#[must_use]
pub fn edit_path(id: IssueId) -> String {
    format!("/edit/{id}")
}

/// Path of the list page with `id` selected
#[must_use]
pub fn selected_path(id: IssueId) -> String {
    format!("{HOME}/{id}")
}

/// Split a request URL into path and search (`?` included)
#[must_use]
pub fn split_url(url: &str) -> (&str, &str) {
    match url.find('?') {
        Some(index) => (&url[..index], &url[index..]),
        None => (url, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_redirects() {
        assert_eq!(Route::resolve("/"), Route::Redirect("/issues"));
        assert_eq!(Route::resolve(""), Route::Redirect("/issues"));
    }

    #[test]
    fn list_with_and_without_selection() {
        assert_eq!(Route::resolve("/issues"), Route::IssueList { selected: None });
        assert_eq!(Route::resolve("/issues/"), Route::IssueList { selected: None });
        assert_eq!(
            Route::resolve("/issues/12"),
            Route::IssueList { selected: Some(IssueId(12)) }
        );
        assert_eq!(Route::resolve("/issues/abc"), Route::IssueList { selected: None });
    }

    #[test]
    fn edit_needs_numeric_id() {
        assert_eq!(Route::resolve("/edit/7"), Route::IssueEdit { id: IssueId(7) });
        assert_eq!(Route::resolve("/edit/x"), Route::NotFound);
        assert_eq!(Route::resolve("/edit"), Route::NotFound);
    }

    #[test]
    fn other_paths() {
        assert_eq!(Route::resolve("/report"), Route::Report);
        assert_eq!(Route::resolve("/about"), Route::NotFound);
        assert_eq!(Route::resolve("/issues/1/extra"), Route::NotFound);
    }

    #[test]
    fn url_split() {
        assert_eq!(split_url("/issues?status=New"), ("/issues", "?status=New"));
        assert_eq!(split_url("/report"), ("/report", ""));
    }
}
