//! Fallback handler for every path not claimed by the API.

use axum::extract::{Query, Request, State, WebSocketUpgrade};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::api::AppState;
use crate::dashboard::websocket::websocket_handler;

/// Query parameters of a log stream upgrade.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamParams {
    pub service: Option<String>,
}

/// Upgrade WebSocket requests to a log stream, serve static files otherwise.
///
/// A malformed query string on a WebSocket request is treated as a missing
/// `service` parameter.
pub async fn upgrade_or_static(
    State(state): State<Arc<AppState>>,
    ws: Option<WebSocketUpgrade>,
    params: Option<Query<StreamParams>>,
    request: Request,
) -> Response {
    match ws {
        Some(ws) => {
            let service = params.and_then(|Query(p)| p.service);
            websocket_handler(ws, state, service)
        }
        None => serve_static(&state.config.server.static_dir, request).await,
    }
}

/// Serve `request` from `dir`, including `index.html` for directories.
async fn serve_static(dir: &Path, request: Request) -> Response {
    match ServeDir::new(dir).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
