//! HTTP front
//!
//! - `GET /env.js`: browser configuration
//! - `GET` anything else: server render, or a 307 for redirecting routes
//!
//! Each request gets a uuid that names both its tracing span and its
//! hydration scope.

use crate::config::UiConfig;
use crate::error::{Result, UiError};
use crate::render::{Rendered, Renderer};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::Instrument;
use tracker_client::{HttpTransport, Transport};
use uuid::Uuid;
use warp::http::{header, StatusCode};
use warp::path::FullPath;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// All routes served by the UI server
pub fn routes(
    renderer: Arc<Renderer>,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let env_script = renderer.config().client_env().to_script();
    let env_js = warp::get()
        .and(warp::path("env.js"))
        .and(warp::path::end())
        .map(move || {
            warp::reply::with_header(env_script.clone(), header::CONTENT_TYPE, "application/javascript")
                .into_response()
        });

    let pages = warp::get()
        .and(warp::path::full())
        .and(
            warp::query::raw()
                .or(warp::any().map(String::new))
                .unify(),
        )
        .and(warp::header::optional::<String>("cookie"))
        .and(warp::any().map(move || renderer.clone()))
        .and_then(handle_page);

    env_js.or(pages).unify()
}

async fn handle_page(
    path: FullPath,
    query: String,
    cookie: Option<String>,
    renderer: Arc<Renderer>,
) -> std::result::Result<Response, Infallible> {
    let request_id = Uuid::new_v4();
    let url = if query.is_empty() {
        path.as_str().to_string()
    } else {
        format!("{}?{query}", path.as_str())
    };
    let span = tracing::info_span!("request", %request_id, url = %url);

    let rendered = renderer.render(&url, cookie, request_id).instrument(span.clone()).await;
    let response = match rendered {
        Ok(Rendered::Html(html)) => {
            tracing::info!(parent: &span, status = 200, "rendered");
            warp::reply::html(html).into_response()
        }
        Ok(Rendered::Redirect(target)) => {
            tracing::info!(parent: &span, status = 307, %target, "redirect");
            warp::reply::with_header(
                warp::reply::with_status(warp::reply(), StatusCode::TEMPORARY_REDIRECT),
                header::LOCATION,
                target,
            )
            .into_response()
        }
        Err(err) => {
            tracing::error!(parent: &span, error = %err, "render failed");
            warp::reply::with_status("Internal Server Error", StatusCode::INTERNAL_SERVER_ERROR)
                .into_response()
        }
    };
    Ok(response)
}

/// Serve until ctrl-c
pub async fn serve(config: UiConfig) -> Result<()> {
    config.validate()?;
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new()?);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let renderer = Arc::new(Renderer::new(config, transport));

    let (bound, server) = warp::serve(routes(renderer))
        .try_bind_with_graceful_shutdown(addr, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %err, "cannot listen for shutdown signal");
            }
        })
        .map_err(|err| UiError::Bind {
            addr,
            message: err.to_string(),
        })?;
    tracing::info!(%bound, "UI server listening");
    server.await;
    tracing::info!("UI server stopped");
    Ok(())
}
