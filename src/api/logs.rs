//! Recent logs endpoint handler.

use crate::api::{ApiError, AppState, LogsQuery, LogsResponse};
use crate::cluster::ensure_valid_service;
use crate::logs::{fetch_recent_logs, DEFAULT_TAIL_LINES, NO_LOGS_AVAILABLE};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use std::sync::Arc;

/// GET /api/logs/:service?lines=N - Last N log lines of a service.
///
/// Log retrieval is best-effort: when the CLI fails the response is still
/// 200 with a placeholder text.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<LogsResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::bad_request(e.body_text()))?;
    ensure_valid_service(&service)?;

    let lines = query.lines.unwrap_or(DEFAULT_TAIL_LINES);
    let logs = fetch_recent_logs(&state.cluster, &service, lines)
        .await
        .unwrap_or_else(|| NO_LOGS_AVAILABLE.to_string());

    Ok(Json(LogsResponse { logs }))
}
