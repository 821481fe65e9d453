/**
 * Page Handlers
 *
 * The client is a single-page application: every page route serves the
 * same HTML shell. The only server-side decision is which side of the
 * login wall the browser belongs on.
 *
 * # Routes
 *
 * - `GET /` and any unmatched GET, including GET on POST-only paths -
 *   shell if logged in, else `/welcome/`
 * - `GET /welcome/` - shell if anonymous, else `/`
 */

use std::sync::Arc;

use axum::{
    extract::State,
    http::{Method, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::backend::error::BackendError;
use crate::backend::middleware::CurrentSession;
use crate::backend::server::config::ServerConfig;

pub const HOME_PATH: &str = "/";
pub const WELCOME_PATH: &str = "/welcome/";

/// Read the application shell from disk
///
/// Read per request so a rebuilt client is picked up without a restart.
pub async fn app_shell(config: &ServerConfig) -> Result<Html<String>, BackendError> {
    let html = tokio::fs::read_to_string(&config.index_html).await.map_err(|e| {
        tracing::error!("Cannot read {}: {}", config.index_html.display(), e);
        e
    })?;
    Ok(Html(html))
}

/// GET /
pub async fn index(
    State(config): State<Arc<ServerConfig>>,
    session: CurrentSession,
) -> Result<Response, BackendError> {
    if !session.is_authenticated() {
        return Ok(Redirect::to(WELCOME_PATH).into_response());
    }
    Ok(app_shell(&config).await?.into_response())
}

/// GET /welcome/
pub async fn welcome(
    State(config): State<Arc<ServerConfig>>,
    session: CurrentSession,
) -> Result<Response, BackendError> {
    if session.is_authenticated() {
        return Ok(Redirect::to(HOME_PATH).into_response());
    }
    Ok(app_shell(&config).await?.into_response())
}

/// Fallback for every unmatched route
///
/// GET (and HEAD) behave like `/`, so client-side routes survive a reload.
/// Other methods get 404.
pub async fn catch_all(
    method: Method,
    config: State<Arc<ServerConfig>>,
    session: CurrentSession,
) -> Result<Response, BackendError> {
    if method != Method::GET && method != Method::HEAD {
        return Ok(StatusCode::NOT_FOUND.into_response());
    }
    index(config, session).await
}
