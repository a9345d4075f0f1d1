//! Server-side render of one request
//!
//! 1. match the route (the root path redirects)
//! 2. run the page loader and the session loader with a server-context
//!    client that forwards the visitor's cookie
//! 3. store both results in a fresh hydration scope
//! 4. mount the controllers, which drain the scope, and render their markup
//! 5. embed the same data in the page for the browser runtime

use crate::config::UiConfig;
use crate::error::Result;
use crate::pages::{IssueEditPage, IssueListPage, IssueReportPage, PageContext, UserSession};
use crate::routes::{split_url, Route};
use crate::template::render_document;
use crate::toast::ToastQueue;
use crate::views;
use serde_json::Value;
use std::sync::Arc;
use tracker_client::{ExecutionContext, GraphQlClient, Transport};
use tracker_hydrate::{encode_slot, EmbeddedGlobals, HydrationScope, HydrationSlot};
use uuid::Uuid;

/// Outcome of a render
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Html(String),
    /// Temporary (307) redirect
    Redirect(String),
}

/// Renders pages against the backend
#[derive(Debug, Clone)]
pub struct Renderer {
    config: UiConfig,
    transport: Arc<dyn Transport>,
}

impl Renderer {
    #[must_use]
    pub fn new(config: UiConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Render `url` (path plus optional search) for a visitor
    pub async fn render(&self, url: &str, cookie: Option<String>, request_id: Uuid) -> Result<Rendered> {
        let (path, search) = split_url(url);
        let route = Route::resolve(path);
        if let Route::Redirect(target) = route {
            tracing::debug!(from = path, to = target, "redirecting");
            return Ok(Rendered::Redirect(target.to_string()));
        }

        let scope = Arc::new(HydrationScope::with_id(request_id));
        let toasts = Arc::new(ToastQueue::new());
        let client = GraphQlClient::new(
            self.config.server_api_endpoint.clone(),
            ExecutionContext::Server,
            self.transport.clone(),
        )
        .with_cookie(cookie);
        let ctx = PageContext::new(client, scope.clone(), toasts.clone());

        let initial_data = load_initial_data(&ctx, route, search).await?;
        let user_data = encode_slot(
            HydrationSlot::UserData,
            UserSession::fetch_data(ctx.client()).await.as_ref(),
        )?;
        store(&scope, HydrationSlot::InitialData, initial_data.as_ref())?;
        store(&scope, HydrationSlot::UserData, user_data.as_ref())?;

        let body = render_body(&ctx, route, search).await;

        for toast in toasts.drain() {
            tracing::warn!(message = %toast.message, "error during server render");
        }
        let globals = EmbeddedGlobals::new(initial_data, user_data);
        Ok(Rendered::Html(render_document(&body, &globals)))
    }
}

async fn load_initial_data(ctx: &PageContext, route: Route, search: &str) -> Result<Option<Value>> {
    let client = ctx.client();
    let slot = HydrationSlot::InitialData;
    let value = match route {
        Route::IssueList { selected } => {
            encode_slot(slot, IssueListPage::fetch_data(client, search, selected).await.as_ref())?
        }
        Route::IssueEdit { id } => {
            encode_slot(slot, IssueEditPage::fetch_data(client, id).await.as_ref())?
        }
        Route::Report => encode_slot(slot, IssueReportPage::fetch_data(client, search).await.as_ref())?,
        Route::Redirect(_) | Route::NotFound => None,
    };
    Ok(value)
}

fn store(scope: &HydrationScope, slot: HydrationSlot, value: Option<&Value>) -> Result<()> {
    if let Some(value) = value {
        scope.store(slot, value.clone())?;
    }
    Ok(())
}

/// Mount what was handed off; a page whose loader failed renders empty
/// and is loaded by the browser instead
async fn render_body(ctx: &PageContext, route: Route, search: &str) -> String {
    let mut body = String::new();
    if ctx.scope().is_stored(HydrationSlot::UserData) {
        body.push_str(&views::navigation(&UserSession::mount(ctx).await));
    }
    if !route.has_loader() {
        body.push_str(&views::not_found());
        return body;
    }
    if !ctx.scope().is_stored(HydrationSlot::InitialData) {
        return body;
    }
    let page = match route {
        Route::IssueList { selected } => {
            views::issue_list(&IssueListPage::mount(ctx.clone(), search, selected).await)
        }
        Route::IssueEdit { id } => views::issue_edit(&IssueEditPage::mount(ctx.clone(), id).await),
        Route::Report => views::issue_report(&IssueReportPage::mount(ctx.clone(), search).await),
        Route::Redirect(_) | Route::NotFound => String::new(),
    };
    body.push_str(&page);
    body
}
